use serde::{Deserialize, Serialize};

/// Model kinds known to the client.
///
/// The lowercase `name()` is the key used by the server in barcode scan
/// responses, template filters and permission maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    StockLocation,
    StockItem,
    Part,
    StockLocationType,
}

impl ModelType {
    pub const ALL: [ModelType; 4] = [
        ModelType::StockLocation,
        ModelType::StockItem,
        ModelType::Part,
        ModelType::StockLocationType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelType::StockLocation => "stocklocation",
            ModelType::StockItem => "stockitem",
            ModelType::Part => "part",
            ModelType::StockLocationType => "stocklocationtype",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelType::StockLocation => "Stock Location",
            ModelType::StockItem => "Stock Item",
            ModelType::Part => "Part",
            ModelType::StockLocationType => "Stock Location Type",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Base URL of the detail page, without the pk
    fn detail_base(&self) -> Option<&'static str> {
        match self {
            ModelType::StockLocation => Some("/stock/location"),
            ModelType::StockItem => Some("/stock/item"),
            ModelType::Part => Some("/part"),
            ModelType::StockLocationType => None,
        }
    }

    /// Canonical front-end URL of an instance: `/stock/location/7/`
    pub fn detail_url(&self, pk: i64) -> Option<String> {
        self.detail_base().map(|base| format!("{}/{}/", base, pk))
    }

    /// Django admin URL, app label + model name
    pub fn admin_url(&self, pk: i64) -> String {
        let app = match self {
            ModelType::Part => "part",
            _ => "stock",
        };
        format!("/admin/{}/{}/{}/", app, self.name(), pk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_urls() {
        assert_eq!(
            ModelType::StockLocation.detail_url(7).as_deref(),
            Some("/stock/location/7/")
        );
        assert_eq!(
            ModelType::StockItem.detail_url(3).as_deref(),
            Some("/stock/item/3/")
        );
        assert_eq!(ModelType::Part.detail_url(1).as_deref(), Some("/part/1/"));
        assert_eq!(ModelType::StockLocationType.detail_url(1), None);
    }

    #[test]
    fn test_name_round_trip() {
        for model in ModelType::ALL {
            assert_eq!(ModelType::from_name(model.name()), Some(model));
        }
        assert_eq!(ModelType::from_name("salesorder"), None);
    }

    #[test]
    fn test_admin_url() {
        assert_eq!(
            ModelType::StockLocation.admin_url(5),
            "/admin/stock/stocklocation/5/"
        );
        assert_eq!(ModelType::Part.admin_url(2), "/admin/part/part/2/");
    }
}
