use crate::domain::common::ModelType;
use crate::integer_aggregate_id;
use crate::shared::navigation::Crumb;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
integer_aggregate_id!(StockLocationId);
integer_aggregate_id!(StockLocationTypeId);

/// URL of the stock index page, parent of all top-level locations
pub const STOCK_INDEX_URL: &str = "/stock/";

// ============================================================================
// Aggregate
// ============================================================================

/// Ancestor entry, present when the location is fetched with `path_detail`.
/// The last entry is the location itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub pk: StockLocationId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTypeDetail {
    pub pk: StockLocationTypeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLocation {
    pub pk: StockLocationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pathstring: String,
    #[serde(default)]
    pub path: Vec<PathEntry>,
    #[serde(default)]
    pub parent: Option<StockLocationId>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub structural: bool,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub items: u64,
    #[serde(default)]
    pub sublocations: u64,
    #[serde(default)]
    pub location_type: Option<StockLocationTypeId>,
    #[serde(default)]
    pub location_type_detail: Option<LocationTypeDetail>,
    #[serde(default)]
    pub barcode_hash: Option<String>,
}

impl StockLocation {
    pub fn detail_url(&self) -> String {
        location_url(self.pk)
    }

    /// Breadcrumb trail: the static "Stock" crumb followed by one crumb per
    /// path entry.
    pub fn breadcrumbs(&self) -> Vec<Crumb> {
        location_breadcrumbs(&self.path)
    }

    /// Where to go once this location has been deleted
    pub fn url_after_delete(&self) -> String {
        match self.parent {
            Some(parent) => location_url(parent),
            None => STOCK_INDEX_URL.to_string(),
        }
    }

    pub fn has_barcode(&self) -> bool {
        self.barcode_hash
            .as_deref()
            .map(|h| !h.is_empty())
            .unwrap_or(false)
    }

    /// Icon to show next to the name, empty strings count as no icon
    pub fn display_icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|i| !i.is_empty())
    }
}

pub fn location_url(pk: StockLocationId) -> String {
    ModelType::StockLocation
        .detail_url(pk.0)
        .unwrap_or_else(|| STOCK_INDEX_URL.to_string())
}

pub fn location_breadcrumbs(path: &[PathEntry]) -> Vec<Crumb> {
    let mut crumbs = Vec::with_capacity(path.len() + 1);
    crumbs.push(Crumb::new("Stock", STOCK_INDEX_URL));
    crumbs.extend(
        path.iter()
            .map(|entry| Crumb::new(entry.name.clone(), location_url(entry.pk)).with_icon(entry.icon.clone())),
    );
    crumbs
}

// ============================================================================
// Write DTOs
// ============================================================================

/// Editable fields, sent as a PATCH body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLocationDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<StockLocationId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<Option<StockLocationTypeId>>,
}

impl StockLocationDto {
    pub fn reparent(parent: StockLocationId) -> Self {
        Self {
            parent: Some(Some(parent)),
            ..Default::default()
        }
    }
}

/// What happens to the contents of a deleted location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteChildAction {
    MoveToParent,
    Delete,
}

impl DeleteChildAction {
    pub const ALL: [DeleteChildAction; 2] =
        [DeleteChildAction::MoveToParent, DeleteChildAction::Delete];

    /// Wire value of the choice
    pub fn value(&self) -> u8 {
        match self {
            DeleteChildAction::MoveToParent => 0,
            DeleteChildAction::Delete => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeleteChildAction::MoveToParent => "Move items to parent location",
            DeleteChildAction::Delete => "Delete items",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockLocationDeleteParams {
    pub delete_stock_items: u8,
    pub delete_sub_location: u8,
}

impl Default for StockLocationDeleteParams {
    fn default() -> Self {
        Self {
            delete_stock_items: DeleteChildAction::MoveToParent.value(),
            delete_sub_location: DeleteChildAction::MoveToParent.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StockLocation {
        serde_json::from_value(serde_json::json!({
            "pk": 9,
            "name": "Shelf 2",
            "description": "Second shelf",
            "pathstring": "Warehouse/Room A/Shelf 2",
            "path": [
                {"pk": 1, "name": "Warehouse", "icon": "ti:building:outline"},
                {"pk": 4, "name": "Room A", "icon": ""},
                {"pk": 9, "name": "Shelf 2"}
            ],
            "parent": 4,
            "items": 12,
            "sublocations": 0,
            "structural": false,
            "external": false,
            "location_type": null
        }))
        .unwrap()
    }

    #[test]
    fn test_breadcrumbs_prefix_root() {
        let location = sample();
        let crumbs = location.breadcrumbs();
        assert_eq!(crumbs.len(), location.path.len() + 1);
        assert_eq!(crumbs[0], Crumb::new("Stock", "/stock/"));
        for (crumb, entry) in crumbs.iter().skip(1).zip(&location.path) {
            assert_eq!(crumb.name, entry.name);
            assert_eq!(
                Some(crumb.url.clone()),
                ModelType::StockLocation.detail_url(entry.pk.0)
            );
        }
        assert_eq!(crumbs[1].icon.as_deref(), Some("ti:building:outline"));
        assert_eq!(crumbs[2].icon, None);
    }

    #[test]
    fn test_breadcrumbs_without_path() {
        let crumbs = location_breadcrumbs(&[]);
        assert_eq!(crumbs, vec![Crumb::new("Stock", "/stock/")]);
    }

    #[test]
    fn test_url_after_delete() {
        let mut location = sample();
        assert_eq!(location.url_after_delete(), "/stock/location/4/");
        location.parent = None;
        assert_eq!(location.url_after_delete(), "/stock/");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let location: StockLocation =
            serde_json::from_str(r#"{"pk": 3, "name": "Bin"}"#).unwrap();
        assert!(location.path.is_empty());
        assert_eq!(location.items, 0);
        assert!(!location.has_barcode());
        assert_eq!(location.display_icon(), None);
    }

    #[test]
    fn test_reparent_patch_body() {
        let body = serde_json::to_value(StockLocationDto::reparent(StockLocationId(5))).unwrap();
        assert_eq!(body, serde_json::json!({"parent": 5}));
    }

    #[test]
    fn test_delete_params_default_to_move() {
        let body = serde_json::to_value(StockLocationDeleteParams::default()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"delete_stock_items": 0, "delete_sub_location": 0})
        );
    }
}
