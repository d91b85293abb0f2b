use contracts::domain::a001_stock_location::aggregate::StockLocationId;
use contracts::domain::a002_stock_item::aggregate::{format_quantity, StockItem};
use contracts::domain::common::ApiEndpoint;
use contracts::usecases::u102_stock_adjustment::adjustment::{
    validate_adjustment, StockCountRequest, StockTransferRequest,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOperation {
    Count,
    Transfer,
}

impl StockOperation {
    pub fn title(&self) -> &'static str {
        match self {
            StockOperation::Count => "Count Stock",
            StockOperation::Transfer => "Transfer Stock",
        }
    }

    pub fn endpoint(&self) -> ApiEndpoint {
        match self {
            StockOperation::Count => ApiEndpoint::StockCount,
            StockOperation::Transfer => ApiEndpoint::StockTransfer,
        }
    }

    /// A count may record an empty item, a transfer must move something
    fn allows_zero(&self) -> bool {
        matches!(self, StockOperation::Count)
    }
}

/// One editable line of the operation modal
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentRow {
    pub item: StockItem,
    /// Raw input text
    pub quantity: String,
    pub selected: bool,
}

impl AdjustmentRow {
    /// Prefilled with the full quantity
    pub fn new(item: StockItem) -> Self {
        Self {
            quantity: format_quantity(item.quantity),
            item,
            selected: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdjustmentRequest {
    Count(StockCountRequest),
    Transfer(StockTransferRequest),
}

/// Validates the selected rows and builds the POST body.
pub fn build_request(
    operation: StockOperation,
    rows: &[AdjustmentRow],
    destination: Option<i64>,
    notes: &str,
) -> Result<AdjustmentRequest, String> {
    let parsed = rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| {
            row.quantity
                .trim()
                .parse::<f64>()
                .map(|quantity| (row.item.clone(), quantity))
                .map_err(|_| format!("{}: invalid quantity", row.item.part_name()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let items = validate_adjustment(&parsed, operation.allows_zero())?;
    let notes = notes.trim().to_string();

    match operation {
        StockOperation::Count => Ok(AdjustmentRequest::Count(StockCountRequest { items, notes })),
        StockOperation::Transfer => {
            let location = destination.ok_or_else(|| "Select a destination location".to_string())?;
            Ok(AdjustmentRequest::Transfer(StockTransferRequest {
                items,
                location: StockLocationId(location),
                notes,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pk: i64, quantity: f64) -> AdjustmentRow {
        AdjustmentRow::new(
            serde_json::from_value(json!({
                "pk": pk, "part": 1, "quantity": quantity,
                "part_detail": {"pk": 1, "name": "Resistor"}
            }))
            .unwrap(),
        )
    }

    #[test]
    fn test_rows_start_with_full_quantity() {
        let row = row(1, 12.0);
        assert_eq!(row.quantity, "12");
        assert!(row.selected);
    }

    #[test]
    fn test_transfer_body_skips_unselected_rows() {
        let mut second = row(2, 3.0);
        second.selected = false;
        let mut first = row(1, 10.0);
        first.quantity = "4".to_string();

        let request =
            build_request(StockOperation::Transfer, &[first, second], Some(7), " moved ").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"pk": 1, "quantity": 4.0}], "location": 7, "notes": "moved"})
        );
    }

    #[test]
    fn test_transfer_needs_destination() {
        assert_eq!(
            build_request(StockOperation::Transfer, &[row(1, 2.0)], None, ""),
            Err("Select a destination location".to_string())
        );
    }

    #[test]
    fn test_count_accepts_zero() {
        let mut counted = row(1, 5.0);
        counted.quantity = "0".to_string();
        let request = build_request(StockOperation::Count, &[counted], None, "").unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"pk": 1, "quantity": 0.0}], "notes": ""})
        );
    }

    #[test]
    fn test_invalid_quantity_names_the_part() {
        let mut bad = row(1, 5.0);
        bad.quantity = "five".to_string();
        assert_eq!(
            build_request(StockOperation::Count, &[bad], None, ""),
            Err("Resistor: invalid quantity".to_string())
        );
    }
}
