use crate::shared::details::{lookup, DetailValue, DetailsField, DetailsSchema, DetailsTable, ItemDetailsGrid};
use contracts::domain::common::ModelType;
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;

fn is_null_or_missing(item: &Value, path: &str) -> bool {
    lookup(item, path).map(Value::is_null).unwrap_or(true)
}

/// Name preceded by the location's own icon when it has one
fn name_with_icon(item: &Value) -> DetailValue {
    let name = lookup(item, "name").and_then(Value::as_str).unwrap_or_default().to_string();
    match lookup(item, "icon").and_then(Value::as_str).filter(|i| !i.is_empty()) {
        Some(icon) => DetailValue::IconText {
            icon: icon.to_string(),
            text: name,
        },
        None => DetailValue::Text(name),
    }
}

pub(crate) fn left_schema() -> Result<DetailsSchema, String> {
    DetailsSchema::new(vec![
        DetailsField::text("name", "Name")
            .icon("location")
            .copyable()
            .formatted(name_with_icon),
        DetailsField::text("pathstring", "Path")
            .icon("sitemap")
            .copyable()
            .hidden_when(|item| is_null_or_missing(item, "pk")),
        DetailsField::text("description", "Description").copyable(),
        DetailsField::link("parent", "Parent Location", ModelType::StockLocation, "name")
            .icon("location")
            .hidden_when(|item| is_null_or_missing(item, "parent")),
    ])
}

pub(crate) fn right_schema() -> Result<DetailsSchema, String> {
    DetailsSchema::new(vec![
        DetailsField::string("items", "Stock Items")
            .icon("stock")
            .formatted(|item| {
                let count = lookup(item, "items").and_then(Value::as_u64).unwrap_or(0);
                DetailValue::Text(count.to_string())
            }),
        DetailsField::string("sublocations", "Sublocations")
            .icon("location")
            .hidden_when(|item| lookup(item, "sublocations").and_then(Value::as_u64).unwrap_or(0) == 0),
        DetailsField::boolean("structural", "Structural").icon("sitemap"),
        DetailsField::boolean("external", "External"),
        DetailsField::string("location_type_detail.name", "Location Type")
            .icon("packages")
            .hidden_when(|item| is_null_or_missing(item, "location_type")),
    ])
}

/// Details panel; the root page has no record and shows a notice instead
#[component]
pub fn LocationDetailsTab(
    #[prop(into)] pk: Signal<Option<i64>>,
    #[prop(into)] item: Signal<Value>,
) -> impl IntoView {
    let schemas = left_schema().and_then(|left| right_schema().map(|right| (left, right)));

    move || {
        if pk.get().is_none() {
            return view! {
                <MessageBar intent=MessageBarIntent::Info>"Top level stock location"</MessageBar>
            }
            .into_any();
        }
        match schemas.clone() {
            Ok((left, right)) => view! {
                <ItemDetailsGrid>
                    <DetailsTable schema=left item=item />
                    <DetailsTable schema=right item=item />
                </ItemDetailsGrid>
            }
            .into_any(),
            Err(e) => {
                log::error!("invalid location details schema: {}", e);
                view! { <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar> }.into_any()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(schema: &DetailsSchema, item: &Value) -> Vec<String> {
        schema.rows(item).into_iter().map(|r| r.label).collect()
    }

    #[test]
    fn test_schemas_are_valid() {
        assert!(left_schema().is_ok());
        assert!(right_schema().is_ok());
    }

    #[test]
    fn test_parent_row_needs_parent() {
        let schema = left_schema().unwrap();
        let top = json!({"pk": 1, "name": "Warehouse", "pathstring": "Warehouse", "description": "", "parent": null});
        assert_eq!(labels(&schema, &top), vec!["Name", "Path", "Description"]);

        let nested = json!({"pk": 2, "name": "Shelf", "pathstring": "Warehouse/Shelf", "description": "", "parent": 1});
        assert_eq!(
            labels(&schema, &nested),
            vec!["Name", "Path", "Description", "Parent Location"]
        );
    }

    #[test]
    fn test_items_default_to_zero_and_hidden_rows_stay_hidden() {
        let schema = right_schema().unwrap();
        let item = json!({
            "pk": 2, "structural": false, "external": true,
            "sublocations": 0, "location_type": null,
            "location_type_detail": {"name": "Bin"}
        });
        let rows = schema.rows(&item);
        assert_eq!(rows[0].value, DetailValue::Text("0".to_string()));
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["items", "structural", "external"]);
    }

    #[test]
    fn test_location_type_from_embedded_detail() {
        let schema = right_schema().unwrap();
        let item = json!({
            "pk": 2, "items": 5, "sublocations": 3, "structural": true, "external": false,
            "location_type": 4, "location_type_detail": {"pk": 4, "name": "Bin"}
        });
        let rows = schema.rows(&item);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].value, DetailValue::Text("5".to_string()));
        assert_eq!(rows[4].value, DetailValue::Text("Bin".to_string()));
        assert_eq!(rows[2].value, DetailValue::Bool(true));
    }

    #[test]
    fn test_name_shows_location_icon() {
        let schema = left_schema().unwrap();
        let with_icon = json!({"pk": 1, "name": "Cold Store", "icon": "ti:snowflake:outline"});
        assert_eq!(
            schema.rows(&with_icon)[0].value,
            DetailValue::IconText {
                icon: "ti:snowflake:outline".to_string(),
                text: "Cold Store".to_string(),
            }
        );

        let plain = json!({"pk": 1, "name": "Cold Store", "icon": ""});
        assert_eq!(schema.rows(&plain)[0].value, DetailValue::Text("Cold Store".to_string()));
    }
}
