use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value body assembled from form fields at submit time. Key order is
/// insertion order so the posted JSON mirrors the form layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: Map<String, Value>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert_text(key, value);
        self
    }

    pub fn insert_text(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.to_string(), Value::String(value.into()));
    }

    pub fn insert_value(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field value as text for validation. Numbers and booleans are rendered,
    /// `null`, arrays and objects read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(value) => Some(value.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_serializes_in_insertion_order() {
        let mut payload = FormPayload::new()
            .with_text("semester", "3")
            .with_text("date", "2026-10-16");
        payload.insert_value("attendance", json!([{ "studentId": "2201110014" }]));

        let encoded = serde_json::to_string(&payload).expect("serializable");
        assert_eq!(
            encoded,
            r#"{"semester":"3","date":"2026-10-16","attendance":[{"studentId":"2201110014"}]}"#
        );
    }

    #[test]
    fn text_view_skips_structured_values() {
        let mut payload = FormPayload::new().with_text("name", "Asha");
        payload.insert_value("marks", json!(28.5));
        payload.insert_value("rows", json!([]));
        payload.insert_value("missing", Value::Null);

        assert_eq!(payload.text("name").as_deref(), Some("Asha"));
        assert_eq!(payload.text("marks").as_deref(), Some("28.5"));
        assert_eq!(payload.text("rows"), None);
        assert_eq!(payload.text("missing"), None);
        assert_eq!(payload.text("unknown"), None);
    }
}
