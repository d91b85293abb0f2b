use super::field::{DetailValue, DetailsField, FieldKind};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub name: &'static str,
    pub label: String,
    pub icon: Option<&'static str>,
    pub copy: bool,
    pub value: DetailValue,
}

/// Validated, ordered list of row descriptors.
#[derive(Debug, Clone)]
pub struct DetailsSchema {
    fields: Vec<DetailsField>,
}

impl DetailsSchema {
    pub fn new(fields: Vec<DetailsField>) -> Result<Self, String> {
        if fields.is_empty() {
            return Err("details schema has no fields".to_string());
        }
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.is_empty() {
                return Err(format!("field '{}' has an empty name", field.label));
            }
            if !seen.insert(field.name) {
                return Err(format!("duplicate field name '{}'", field.name));
            }
        }
        Ok(Self { fields })
    }

    /// Visible rows in declaration order. Hidden fields and fields whose
    /// name is absent from the record produce no row.
    pub fn rows(&self, item: &Value) -> Vec<DetailRow> {
        self.fields
            .iter()
            .filter(|field| !field.is_hidden(item))
            .filter_map(|field| {
                let value = match &field.formatter {
                    Some(format) => format(item),
                    None => resolve_value(field, item)?,
                };
                Some(DetailRow {
                    name: field.name,
                    label: field.label.clone(),
                    icon: field.icon,
                    copy: field.copy,
                    value,
                })
            })
            .collect()
    }
}

/// Identity of a rendered row; changes whenever the shown value changes
pub fn row_key(row: &DetailRow) -> (&'static str, String) {
    (row.name, format!("{:?}", row.value))
}

/// Looks up a dotted path such as `location_type_detail.name`
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |current, key| current.as_object()?.get(key))
}

fn resolve_value(field: &DetailsField, item: &Value) -> Option<DetailValue> {
    let raw = lookup(item, field.name)?;
    let value = match field.kind {
        FieldKind::Text | FieldKind::String => match raw {
            Value::Null => DetailValue::Empty,
            Value::String(s) if s.is_empty() => DetailValue::Empty,
            Value::String(s) => DetailValue::Text(s.clone()),
            Value::Bool(b) => DetailValue::Text(if *b { "Yes" } else { "No" }.to_string()),
            other => DetailValue::Text(other.to_string()),
        },
        FieldKind::Boolean => DetailValue::Bool(truthy(raw)),
        FieldKind::Link { model, model_field } => match raw.as_i64() {
            Some(pk) => {
                let embedded = format!("{}_detail.{}", field.name, model_field);
                DetailValue::Link {
                    model,
                    pk,
                    model_field,
                    label: lookup(item, &embedded)
                        .and_then(Value::as_str)
                        .map(str::to_string),
                }
            }
            None => DetailValue::Empty,
        },
    };
    Some(value)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::ModelType;
    use serde_json::json;

    fn location() -> Value {
        json!({
            "pk": 7,
            "name": "Shelf A",
            "description": "",
            "structural": false,
            "parent": 3,
            "location_type": 2,
            "location_type_detail": {"pk": 2, "name": "Shelf"},
            "items": 4
        })
    }

    #[test]
    fn test_schema_validation() {
        assert!(DetailsSchema::new(vec![]).is_err());
        let dup = DetailsSchema::new(vec![
            DetailsField::string("name", "Name"),
            DetailsField::text("name", "Name again"),
        ]);
        assert_eq!(dup.unwrap_err(), "duplicate field name 'name'");
    }

    #[test]
    fn test_hidden_fields_never_render() {
        let schema = DetailsSchema::new(vec![
            DetailsField::string("name", "Name"),
            DetailsField::text("description", "Description").hidden(true),
            DetailsField::string("items", "Stock Items").hidden_when(|item| {
                lookup(item, "items").and_then(Value::as_i64) == Some(4)
            }),
        ])
        .unwrap();
        let rows = schema.rows(&location());
        assert_eq!(rows.iter().map(|r| r.name).collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_missing_name_renders_nothing() {
        let schema = DetailsSchema::new(vec![
            DetailsField::string("name", "Name"),
            DetailsField::string("pathstring", "Path"),
        ])
        .unwrap();
        assert_eq!(schema.rows(&location()).len(), 1);
    }

    #[test]
    fn test_value_kinds() {
        let schema = DetailsSchema::new(vec![
            DetailsField::text("description", "Description"),
            DetailsField::boolean("structural", "Structural"),
            DetailsField::link("parent", "Parent", ModelType::StockLocation, "name"),
            DetailsField::link("location_type", "Type", ModelType::StockLocationType, "name"),
            DetailsField::string("items", "Items")
                .formatted(|_| DetailValue::Text("four".into())),
        ])
        .unwrap();
        let rows = schema.rows(&location());
        assert_eq!(rows[0].value, DetailValue::Empty);
        assert_eq!(rows[1].value, DetailValue::Bool(false));
        assert_eq!(
            rows[2].value,
            DetailValue::Link {
                model: ModelType::StockLocation,
                pk: 3,
                model_field: "name",
                label: None,
            }
        );
        assert_eq!(
            rows[3].value,
            DetailValue::Link {
                model: ModelType::StockLocationType,
                pk: 2,
                model_field: "name",
                label: Some("Shelf".into()),
            }
        );
        assert_eq!(rows[4].value, DetailValue::Text("four".into()));
    }

    #[test]
    fn test_formatter_wins_over_missing_name() {
        let schema = DetailsSchema::new(vec![DetailsField::string("sublocations", "Sublocations")
            .formatted(|item| {
                DetailValue::Text(lookup(item, "items").map(|v| v.to_string()).unwrap_or_default())
            })])
        .unwrap();
        assert_eq!(schema.rows(&location())[0].value, DetailValue::Text("4".into()));
    }

    #[test]
    fn test_dotted_lookup() {
        let item = location();
        assert_eq!(
            lookup(&item, "location_type_detail.name"),
            Some(&json!("Shelf"))
        );
        assert_eq!(lookup(&item, "location_type_detail.icon"), None);
        assert_eq!(lookup(&item, "name.first"), None);
    }

    #[test]
    fn test_row_keys_follow_value_changes() {
        let schema = DetailsSchema::new(vec![
            DetailsField::boolean("structural", "Structural"),
            DetailsField::link("parent", "Parent", ModelType::StockLocation, "name"),
            DetailsField::string("description", "Description"),
        ])
        .unwrap();
        let keys = |item: Value| schema.rows(&item).iter().map(row_key).collect::<Vec<_>>();

        let before = keys(json!({"structural": false, "parent": 3, "description": ""}));
        let after = keys(json!({"structural": true, "parent": 4, "description": ""}));
        assert_ne!(before[0], after[0]);
        assert_ne!(before[1], after[1]);
        assert_eq!(before[2], after[2]);
        assert_eq!(before, keys(json!({"structural": false, "parent": 3, "description": ""})));
    }
}
