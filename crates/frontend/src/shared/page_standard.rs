//! Page categories and page ids.
//!
//! Every routed page declares an id `{entity}--{category}` and a
//! `data-page-category`, so a DOM node can be traced back to its module:
//! `a001_stock_location--detail` lives in `domain/a001_stock_location/ui/details`.

/// Single record with panels.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Table of records, standalone or embedded in a panel.
pub const PAGE_CAT_LIST: &str = "list";

/// Free-form page (not found, permission notices).
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_DETAIL, PAGE_CAT_LIST, PAGE_CAT_CUSTOM];

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

/// `{entity}--{category}` with both halves non-empty and a known category
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

/// CSS class of the page root for a category
pub fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_CUSTOM => "page page--custom",
        _ => "page",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_stock_location--detail"));
        assert!(is_valid_page_id("a002_stock_item--list"));
        assert!(!is_valid_page_id("a001_stock_location"));
        assert!(!is_valid_page_id("--detail"));
        assert!(!is_valid_page_id("a001_stock_location--wizard"));
    }

    #[test]
    fn test_page_class() {
        assert_eq!(page_class(PAGE_CAT_DETAIL), "page page--detail");
        assert_eq!(page_class(PAGE_CAT_LIST), "page");
    }
}
