use crate::domain::a001_stock_location::aggregate::StockLocationId;
use crate::domain::a003_part::aggregate::PartId;
use crate::integer_aggregate_id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

integer_aggregate_id!(StockItemId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSummary {
    pub pk: PartId,
    pub name: String,
    #[serde(rename = "IPN", default)]
    pub ipn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub pk: StockItemId,
    pub part: PartId,
    #[serde(default)]
    pub part_detail: Option<PartSummary>,
    pub quantity: f64,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub location: Option<StockLocationId>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub updated: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

impl StockItem {
    pub fn part_name(&self) -> String {
        self.part_detail
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Part #{}", self.part))
    }

    pub fn part_ipn(&self) -> Option<&str> {
        self.part_detail.as_ref().and_then(|p| p.ipn.as_deref())
    }

    pub fn is_serialized(&self) -> bool {
        self.serial.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }

    /// `# 1042` for serialized items, the quantity otherwise
    pub fn quantity_display(&self) -> String {
        match self.serial.as_deref() {
            Some(serial) if !serial.is_empty() => format!("# {}", serial),
            _ => format_quantity(self.quantity),
        }
    }
}

/// Query of the stock item list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockItemFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    /// Also list items in sub-locations
    pub cascade: bool,
    pub part_detail: bool,
}

impl StockItemFilters {
    /// Items currently in stock at `location`, with part details embedded
    pub fn in_location(location: Option<i64>) -> Self {
        Self {
            location,
            in_stock: Some(true),
            cascade: false,
            part_detail: true,
        }
    }
}

/// Drops the fractional part of whole quantities: `5.0` → `5`, `2.5` → `2.5`
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        let s = format!("{:.5}", quantity);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_display() {
        let mut item: StockItem = serde_json::from_value(serde_json::json!({
            "pk": 1, "part": 2, "quantity": 5.0
        }))
        .unwrap();
        assert_eq!(item.quantity_display(), "5");
        assert!(item.in_stock);

        item.quantity = 2.25;
        assert_eq!(item.quantity_display(), "2.25");

        item.serial = Some("1042".to_string());
        assert_eq!(item.quantity_display(), "# 1042");
        assert!(item.is_serialized());
    }

    #[test]
    fn test_part_name_fallback() {
        let item: StockItem = serde_json::from_value(serde_json::json!({
            "pk": 1, "part": 8, "quantity": 1,
            "part_detail": null,
            "updated": "2024-05-01"
        }))
        .unwrap();
        assert_eq!(item.part_name(), "Part #8");
        assert_eq!(item.part_ipn(), None);
        assert_eq!(item.updated, NaiveDate::from_ymd_opt(2024, 5, 1));
    }
}
