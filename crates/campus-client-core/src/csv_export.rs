use serde_json::{Map, Value};

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvExportError {
    #[error("No data to export")]
    NoRows,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Serializes flat records. The first row's keys form the unquoted header;
/// every data cell is quoted with embedded quotes doubled. Keys missing from
/// later rows, and `null` values, export as empty cells.
pub fn export_to_csv(rows: &[Map<String, Value>], filename: &str) -> Result<CsvExport, CsvExportError> {
    let Some(first) = rows.first() else {
        return Err(CsvExportError::NoRows);
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| quote_cell(&cell_text(row.get(*header))))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(CsvExport {
        file_name: format!("{filename}.csv"),
        mime_type: CSV_MIME_TYPE,
        content: lines.join("\n"),
    })
}

/// Exports a JSON array of objects; non-object entries are skipped.
pub fn export_json_rows(value: &Value, filename: &str) -> Result<CsvExport, CsvExportError> {
    let rows: Vec<Map<String, Value>> = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_object().cloned())
                .collect()
        })
        .unwrap_or_default();
    export_to_csv(&rows, filename)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn quote_cell(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        value
            .as_array()
            .expect("array")
            .iter()
            .map(|row| row.as_object().expect("object").clone())
            .collect()
    }

    #[test]
    fn header_comes_from_first_row_and_cells_are_quoted() {
        let export = export_to_csv(&rows(json!([{ "a": 1, "b": "x,y" }])), "f").expect("export");
        assert_eq!(export.file_name, "f.csv");
        assert_eq!(export.mime_type, CSV_MIME_TYPE);
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines, vec!["a,b", r#""1","x,y""#]);
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let export = export_to_csv(
            &rows(json!([{ "title": "The \"Mid-term\" schedule" }])),
            "notices",
        )
        .expect("export");
        assert_eq!(export.content, "title\n\"The \"\"Mid-term\"\" schedule\"");
    }

    #[test]
    fn missing_and_null_cells_export_empty() {
        let export = export_to_csv(
            &rows(json!([
                { "name": "Data Structures", "lab": 18 },
                { "name": "Algorithms", "lab": null },
                { "name": "Networks" }
            ])),
            "results",
        )
        .expect("export");
        assert_eq!(
            export.content,
            "name,lab\n\"Data Structures\",\"18\"\n\"Algorithms\",\"\"\n\"Networks\",\"\""
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(export_to_csv(&[], "empty"), Err(CsvExportError::NoRows));
        assert_eq!(
            export_json_rows(&json!({ "not": "an array" }), "empty"),
            Err(CsvExportError::NoRows)
        );
        assert_eq!(CsvExportError::NoRows.to_string(), "No data to export");
    }
}
