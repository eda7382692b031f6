use std::collections::BTreeMap;

use regex::Regex;

use crate::payload::FormPayload;

/// Field name to the message of the last rule it violated.
pub type ValidationErrors = BTreeMap<String, String>;

pub type CustomCheck = fn(&str) -> Option<String>;

/// Constraints for one field. Every check except `required` only runs when
/// the field has a non-empty value.
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub message: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<CustomCheck>,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn pattern(mut self, pattern: Regex, message: Option<&str>) -> Self {
        self.pattern = Some(pattern);
        self.message = message.map(ToString::to_string);
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    pub fn custom(mut self, check: CustomCheck) -> Self {
        self.custom = Some(check);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, rule: FieldRule) -> Self {
        self.rules.push((name.to_string(), rule));
        self
    }

    pub fn required_fields(names: &[&str]) -> Self {
        names
            .iter()
            .fold(Self::new(), |rules, name| rules.field(name, FieldRule::required()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Checks every rule and collects all violations. Nothing short-circuits: a
/// later failing check on the same field replaces the earlier message.
pub fn validate(payload: &FormPayload, rules: &RuleSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (field, rule) in rules.iter() {
        let value = payload.text(field).unwrap_or_default();
        let present = !value.is_empty();

        if rule.required && value.trim().is_empty() {
            errors.insert(field.to_string(), format!("{field} is required"));
        }

        if let Some(min_length) = rule.min_length {
            if present && value.chars().count() < min_length {
                errors.insert(
                    field.to_string(),
                    format!("{field} must be at least {min_length} characters"),
                );
            }
        }

        if let Some(pattern) = rule.pattern.as_ref() {
            if present && !pattern.is_match(&value) {
                let message = rule
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("{field} format is invalid"));
                errors.insert(field.to_string(), message);
            }
        }

        let numeric = if present {
            value.trim().parse::<f64>().ok()
        } else {
            None
        };

        if let (Some(bound), Some(number)) = (rule.min, numeric) {
            if number < bound {
                errors.insert(
                    field.to_string(),
                    format!("{field} must be at least {}", format_bound(bound)),
                );
            }
        }

        if let (Some(bound), Some(number)) = (rule.max, numeric) {
            if number > bound {
                errors.insert(
                    field.to_string(),
                    format!("{field} cannot exceed {}", format_bound(bound)),
                );
            }
        }

        if let Some(check) = rule.custom {
            if present {
                if let Some(message) = check(&value) {
                    errors.insert(field.to_string(), message);
                }
            }
        }
    }

    errors
}

fn format_bound(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < 1e15 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}
