use crate::domain::a001_stock_location::aggregate::StockLocationId;
use crate::integer_aggregate_id;
use serde::{Deserialize, Serialize};

integer_aggregate_id!(PartId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub pk: PartId,
    pub name: String,
    #[serde(rename = "IPN", default)]
    pub ipn: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_location: Option<StockLocationId>,
    #[serde(default)]
    pub in_stock: f64,
    #[serde(default)]
    pub active: bool,
}
