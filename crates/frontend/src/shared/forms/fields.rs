use contracts::domain::common::ApiEndpoint;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub value: Value,
    pub display_name: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<Value>, display_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldKind {
    String,
    Text,
    Boolean,
    Choice(Vec<ChoiceOption>),
    /// Pk of a record picked from a list endpoint
    Related {
        endpoint: ApiEndpoint,
        filters: Vec<(&'static str, String)>,
        display_field: &'static str,
    },
    /// Icon name, e.g. `ti:box:outline`
    Icon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiFormField {
    pub name: &'static str,
    pub label: String,
    pub description: Option<String>,
    pub kind: FormFieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl ApiFormField {
    pub fn new(name: &'static str, label: impl Into<String>, kind: FormFieldKind) -> Self {
        Self {
            name,
            label: label.into(),
            description: None,
            kind,
            required: false,
            default: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Text shown in the field's input for a server value.
///
/// Booleans are `"true"` / `"false"`, null and missing values are empty.
pub fn initial_input(field: &ApiFormField, record: &Value) -> String {
    let value = record
        .get(field.name)
        .filter(|v| !v.is_null())
        .or(field.default.as_ref());
    match value {
        None => match field.kind {
            FormFieldKind::Boolean => "false".to_string(),
            _ => String::new(),
        },
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Converts an input's text back to the JSON value sent to the server.
pub fn parse_input(field: &ApiFormField, raw: &str) -> Result<Value, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        if field.required {
            return Err("This field is required".to_string());
        }
        return Ok(match field.kind {
            FormFieldKind::Boolean => Value::Bool(false),
            FormFieldKind::Related { .. } | FormFieldKind::Choice(_) => Value::Null,
            _ => Value::String(String::new()),
        });
    }
    match &field.kind {
        FormFieldKind::String | FormFieldKind::Text | FormFieldKind::Icon => {
            Ok(Value::String(raw.to_string()))
        }
        FormFieldKind::Boolean => Ok(Value::Bool(raw == "true")),
        FormFieldKind::Choice(choices) => choices
            .iter()
            .find(|c| choice_key(&c.value) == raw)
            .map(|c| c.value.clone())
            .ok_or_else(|| format!("'{}' is not a valid choice", raw)),
        FormFieldKind::Related { .. } => raw
            .parse::<i64>()
            .map(|pk| Value::Number(Number::from(pk)))
            .map_err(|_| format!("'{}' is not a valid selection", raw)),
    }
}

/// `<option value>` of a choice
pub fn choice_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Request body from the inputs, or per-field errors
pub fn build_body(
    fields: &[ApiFormField],
    inputs: &[String],
) -> Result<Value, Vec<(&'static str, String)>> {
    let mut body = Map::new();
    let mut errors = Vec::new();
    for (field, raw) in fields.iter().zip(inputs) {
        match parse_input(field, raw) {
            Ok(value) => {
                body.insert(field.name.to_string(), value);
            }
            Err(message) => errors.push((field.name, message)),
        }
    }
    if errors.is_empty() {
        Ok(Value::Object(body))
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn choices() -> FormFieldKind {
        FormFieldKind::Choice(vec![
            ChoiceOption::new(0, "Move items to parent location"),
            ChoiceOption::new(1, "Delete items"),
        ])
    }

    #[test]
    fn test_initial_input() {
        let record = json!({"name": "Shelf", "structural": true, "parent": null, "location_type": 2});
        let name = ApiFormField::new("name", "Name", FormFieldKind::String);
        let structural = ApiFormField::new("structural", "Structural", FormFieldKind::Boolean);
        let external = ApiFormField::new("external", "External", FormFieldKind::Boolean);
        let parent = ApiFormField::new(
            "parent",
            "Parent",
            FormFieldKind::Related {
                endpoint: ApiEndpoint::StockLocationList,
                filters: vec![],
                display_field: "pathstring",
            },
        );
        let action = ApiFormField::new("delete_stock_items", "Items", choices()).default_value(0);

        assert_eq!(initial_input(&name, &record), "Shelf");
        assert_eq!(initial_input(&structural, &record), "true");
        assert_eq!(initial_input(&external, &record), "false");
        assert_eq!(initial_input(&parent, &record), "");
        assert_eq!(initial_input(&action, &record), "0");
    }

    #[test]
    fn test_parse_choice_keeps_numeric_value() {
        let field = ApiFormField::new("delete_sub_location", "Children", choices());
        assert_eq!(parse_input(&field, "1"), Ok(json!(1)));
        assert!(parse_input(&field, "7").is_err());
    }

    #[test]
    fn test_build_body() {
        let fields = vec![
            ApiFormField::new("name", "Name", FormFieldKind::String).required(),
            ApiFormField::new(
                "parent",
                "Parent",
                FormFieldKind::Related {
                    endpoint: ApiEndpoint::StockLocationList,
                    filters: vec![],
                    display_field: "pathstring",
                },
            ),
            ApiFormField::new("structural", "Structural", FormFieldKind::Boolean),
        ];
        let body = build_body(&fields, &["Bin 4".into(), "12".into(), "true".into()]).unwrap();
        assert_eq!(body, json!({"name": "Bin 4", "parent": 12, "structural": true}));

        let cleared = build_body(&fields, &["Bin 4".into(), "".into(), "false".into()]).unwrap();
        assert_eq!(cleared["parent"], Value::Null);

        let errors = build_body(&fields, &["  ".into(), "x".into(), "false".into()]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], ("name", "This field is required".to_string()));
    }
}
