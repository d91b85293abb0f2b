use crate::shared::api::{ApiClient, ApiError};
use crate::shared::forms::{ApiFormField, ChoiceOption, FormFieldKind};
use contracts::domain::a001_stock_location::aggregate::{
    DeleteChildAction, StockLocationDeleteParams, StockLocationDto, StockLocationId,
};
use contracts::domain::a002_stock_item::aggregate::StockItemId;
use contracts::domain::common::ApiEndpoint;
use contracts::usecases::u101_barcode_scan::scan::ResolvedBarcode;
use contracts::usecases::u102_stock_adjustment::adjustment::{
    StockAdjustmentItem, StockTransferRequest,
};
use serde_json::Value;

/// Query of the location detail request, embeds the ancestor path
pub fn location_query() -> Vec<(&'static str, String)> {
    vec![("path_detail", "true".to_string())]
}

pub fn location_form_fields() -> Vec<ApiFormField> {
    vec![
        ApiFormField::new("name", "Name", FormFieldKind::String).required(),
        ApiFormField::new("description", "Description", FormFieldKind::Text),
        ApiFormField::new(
            "parent",
            "Parent Location",
            FormFieldKind::Related {
                endpoint: ApiEndpoint::StockLocationList,
                filters: vec![],
                display_field: "pathstring",
            },
        )
        .description("Parent stock location"),
        ApiFormField::new("location_type", "Location Type", FormFieldKind::Related {
            endpoint: ApiEndpoint::StockLocationTypeList,
            filters: vec![],
            display_field: "name",
        }),
        ApiFormField::new("custom_icon", "Icon", FormFieldKind::Icon),
        ApiFormField::new("structural", "Structural", FormFieldKind::Boolean).description(
            "Stock items may not be directly located into a structural location",
        ),
        ApiFormField::new("external", "External", FormFieldKind::Boolean)
            .description("This is an external stock location"),
    ]
}

fn delete_choices() -> Vec<ChoiceOption> {
    DeleteChildAction::ALL
        .into_iter()
        .map(|action| ChoiceOption::new(action.value(), action.label()))
        .collect()
}

pub fn delete_location_fields() -> Vec<ApiFormField> {
    let defaults = StockLocationDeleteParams::default();
    vec![
        ApiFormField::new(
            "delete_stock_items",
            "Items Action",
            FormFieldKind::Choice(delete_choices()),
        )
        .description("Action for stock items in this location")
        .required()
        .default_value(defaults.delete_stock_items),
        ApiFormField::new(
            "delete_sub_location",
            "Child Locations Action",
            FormFieldKind::Choice(delete_choices()),
        )
        .description("Action for child locations in this location")
        .required()
        .default_value(defaults.delete_sub_location),
    ]
}

/// Transfer of a scanned item's whole quantity into `location`
pub fn scan_transfer_request(
    location: StockLocationId,
    scanned: &ResolvedBarcode,
) -> Result<StockTransferRequest, String> {
    let quantity = scanned
        .instance
        .get("quantity")
        .and_then(Value::as_f64)
        .ok_or_else(|| "Scanned stock item has no quantity".to_string())?;
    Ok(StockTransferRequest {
        items: vec![StockAdjustmentItem {
            pk: StockItemId(scanned.pk),
            quantity,
        }],
        location,
        notes: String::new(),
    })
}

/// PATCH body moving a scanned location below `location`
pub fn scan_reparent_body(
    location: StockLocationId,
    scanned: &ResolvedBarcode,
) -> Result<StockLocationDto, String> {
    if scanned.pk == location.0 {
        return Err("Cannot scan a location into itself".to_string());
    }
    Ok(StockLocationDto::reparent(location))
}

pub async fn transfer_into(api: &ApiClient, request: &StockTransferRequest) -> Result<(), ApiError> {
    let _: Value = api
        .post(&ApiEndpoint::StockTransfer.url(None), request)
        .await?;
    Ok(())
}

pub async fn reparent(api: &ApiClient, child: i64, body: &StockLocationDto) -> Result<(), ApiError> {
    let _: Value = api
        .patch(&ApiEndpoint::StockLocationList.url(Some(child)), body)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::forms::{build_body, initial_input};
    use contracts::domain::common::ModelType;
    use serde_json::json;

    fn scanned(model: ModelType, pk: i64, instance: Value) -> ResolvedBarcode {
        ResolvedBarcode {
            model,
            pk,
            instance,
            message: None,
        }
    }

    #[test]
    fn test_scanned_item_moves_full_quantity() {
        let item = scanned(ModelType::StockItem, 31, json!({"pk": 31, "quantity": 12.5}));
        let request = scan_transfer_request(StockLocationId(7), &item).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"pk": 31, "quantity": 12.5}], "location": 7, "notes": ""})
        );

        let bare = scanned(ModelType::StockItem, 31, Value::Null);
        assert!(scan_transfer_request(StockLocationId(7), &bare).is_err());
    }

    #[test]
    fn test_scanned_location_is_reparented() {
        let child = scanned(ModelType::StockLocation, 12, Value::Null);
        let body = scan_reparent_body(StockLocationId(7), &child).unwrap();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"parent": 7}));

        let itself = scanned(ModelType::StockLocation, 7, Value::Null);
        assert!(scan_reparent_body(StockLocationId(7), &itself).is_err());
    }

    #[test]
    fn test_delete_defaults_move_to_parent() {
        let fields = delete_location_fields();
        let body = build_body(&fields, &["".to_string(), "1".to_string()]);
        // required choices left empty are rejected, never sent as null
        assert!(body.is_err());

        let untouched: Vec<String> = fields.iter().map(|f| initial_input(f, &Value::Null)).collect();
        assert_eq!(
            build_body(&fields, &untouched).unwrap(),
            serde_json::to_value(StockLocationDeleteParams::default()).unwrap()
        );

        let body = build_body(&fields, &["0".to_string(), "1".to_string()]).unwrap();
        assert_eq!(body, json!({"delete_stock_items": 0, "delete_sub_location": 1}));
    }

    #[test]
    fn test_edit_form_names_are_unique() {
        let fields = location_form_fields();
        let mut names: Vec<_> = fields.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), fields.len());
    }
}
