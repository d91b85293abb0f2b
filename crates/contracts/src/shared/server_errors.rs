use serde_json::Value;
use std::collections::BTreeMap;

/// Validation errors returned by the server for a rejected write.
///
/// The body is a JSON object mapping field names to message lists, with
/// form-level messages under `non_field_errors` or `detail`. Nested objects
/// (errors for nested serializers) are flattened with dotted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub non_field: Vec<String>,
}

impl ServerErrors {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => {
                let text = body.trim();
                if text.is_empty() {
                    Self::default()
                } else {
                    Self {
                        fields: BTreeMap::new(),
                        non_field: vec![text.to_string()],
                    }
                }
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let mut errors = Self::default();
        match value {
            Value::Object(map) => {
                for (key, entry) in map {
                    errors.collect(key, entry);
                }
            }
            other => errors.non_field.extend(messages(other)),
        }
        errors
    }

    fn collect(&mut self, key: &str, entry: &Value) {
        if key == "non_field_errors" || key == "detail" || key == "error" {
            self.non_field.extend(messages(entry));
            return;
        }
        match entry {
            Value::Object(nested) => {
                for (sub_key, sub_entry) in nested {
                    self.collect(&format!("{}.{}", key, sub_key), sub_entry);
                }
            }
            other => {
                let msgs = messages(other);
                if !msgs.is_empty() {
                    self.fields.entry(key.to_string()).or_default().extend(msgs);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(|v| v.as_slice())
    }

    /// Single line summary for places without per-field rendering
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self.non_field.clone();
        for (field, msgs) in &self.fields {
            parts.push(format!("{}: {}", field, msgs.join(", ")));
        }
        parts.join("; ")
    }
}

fn messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(messages).collect(),
        Value::Null => vec![],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_and_form_errors() {
        let errors = ServerErrors::parse(
            r#"{"name": ["This field is required."], "non_field_errors": ["Cannot move"]}"#,
        );
        assert_eq!(
            errors.field("name"),
            Some(&["This field is required.".to_string()][..])
        );
        assert_eq!(errors.non_field, vec!["Cannot move".to_string()]);
    }

    #[test]
    fn test_detail_is_form_level() {
        let errors = ServerErrors::parse(r#"{"detail": "Not found."}"#);
        assert!(errors.fields.is_empty());
        assert_eq!(errors.non_field, vec!["Not found.".to_string()]);
    }

    #[test]
    fn test_nested_errors_use_dotted_keys() {
        let errors = ServerErrors::parse(r#"{"items": {"0": {"quantity": ["Must be positive"]}}}"#);
        assert_eq!(
            errors.field("items.0.quantity"),
            Some(&["Must be positive".to_string()][..])
        );
    }

    #[test]
    fn test_plain_text_body() {
        let errors = ServerErrors::parse("Internal Server Error");
        assert_eq!(errors.non_field, vec!["Internal Server Error".to_string()]);
        assert!(ServerErrors::parse("  ").is_empty());
    }

    #[test]
    fn test_summary() {
        let errors = ServerErrors::parse(r#"{"parent": ["Invalid"], "detail": "Bad"}"#);
        assert_eq!(errors.summary(), "Bad; parent: Invalid");
    }
}
