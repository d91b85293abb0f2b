//! Dropdown menus and buttons of a detail page's action row.

mod admin_button;
mod dropdown;

pub use admin_button::AdminButton;
pub use dropdown::{ActionDropdown, OptionsActionDropdown};

use leptos::prelude::*;

/// One entry of an action dropdown
#[derive(Clone)]
pub struct ActionItem {
    pub name: String,
    pub icon: &'static str,
    pub tooltip: String,
    pub hidden: bool,
    pub on_click: Callback<()>,
}

impl ActionItem {
    pub fn new(name: impl Into<String>, icon: &'static str, on_click: Callback<()>) -> Self {
        let name = name.into();
        Self {
            tooltip: name.clone(),
            name,
            icon,
            hidden: false,
            on_click,
        }
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

}

pub fn edit_item_action(hidden: bool, tooltip: impl Into<String>, on_click: Callback<()>) -> ActionItem {
    ActionItem::new("Edit", "edit", on_click)
        .tooltip(tooltip)
        .hidden(hidden)
}

pub fn delete_item_action(
    hidden: bool,
    tooltip: impl Into<String>,
    on_click: Callback<()>,
) -> ActionItem {
    ActionItem::new("Delete", "trash", on_click)
        .tooltip(tooltip)
        .hidden(hidden)
}

pub fn visible_actions(actions: &[ActionItem]) -> Vec<ActionItem> {
    actions.iter().filter(|a| !a.hidden).cloned().collect()
}
