use crate::domain::a001_stock_location::aggregate::StockLocationId;
use crate::domain::a002_stock_item::aggregate::{StockItem, StockItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustmentItem {
    pub pk: StockItemId,
    pub quantity: f64,
}

/// Body of `stock/transfer/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransferRequest {
    pub items: Vec<StockAdjustmentItem>,
    pub location: StockLocationId,
    #[serde(default)]
    pub notes: String,
}

/// Body of `stock/count/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockCountRequest {
    pub items: Vec<StockAdjustmentItem>,
    #[serde(default)]
    pub notes: String,
}

/// Validates the rows of an adjustment before submit.
///
/// Transfer moves at most the available quantity and needs a positive amount;
/// a count may be zero but never negative.
pub fn validate_adjustment(
    rows: &[(StockItem, f64)],
    allow_zero: bool,
) -> Result<Vec<StockAdjustmentItem>, String> {
    if rows.is_empty() {
        return Err("No stock items selected".to_string());
    }
    rows.iter()
        .map(|(item, quantity)| {
            let quantity = *quantity;
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(format!("{}: quantity must not be negative", item.part_name()));
            }
            if !allow_zero && quantity == 0.0 {
                return Err(format!("{}: quantity must be greater than zero", item.part_name()));
            }
            if !allow_zero && quantity > item.quantity {
                return Err(format!(
                    "{}: quantity exceeds available stock",
                    item.part_name()
                ));
            }
            Ok(StockAdjustmentItem {
                pk: item.pk,
                quantity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(pk: i64, quantity: f64) -> StockItem {
        serde_json::from_value(json!({
            "pk": pk, "part": 1, "quantity": quantity,
            "part_detail": {"pk": 1, "name": "Resistor"}
        }))
        .unwrap()
    }

    #[test]
    fn test_transfer_body() {
        let request = StockTransferRequest {
            items: vec![StockAdjustmentItem {
                pk: StockItemId(4),
                quantity: 10.0,
            }],
            location: StockLocationId(2),
            notes: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"pk": 4, "quantity": 10.0}], "location": 2, "notes": ""})
        );
    }

    #[test]
    fn test_transfer_rejects_excess_and_zero() {
        assert!(validate_adjustment(&[(item(1, 5.0), 6.0)], false).is_err());
        assert!(validate_adjustment(&[(item(1, 5.0), 0.0)], false).is_err());
        assert_eq!(
            validate_adjustment(&[(item(1, 5.0), 5.0)], false).unwrap(),
            vec![StockAdjustmentItem { pk: StockItemId(1), quantity: 5.0 }]
        );
    }

    #[test]
    fn test_count_allows_zero_but_not_negative() {
        assert!(validate_adjustment(&[(item(1, 5.0), 0.0)], true).is_ok());
        assert!(validate_adjustment(&[(item(1, 5.0), 12.0)], true).is_ok());
        assert!(validate_adjustment(&[(item(1, 5.0), -1.0)], true).is_err());
        assert!(validate_adjustment(&[], true).is_err());
    }
}
