//! Tabbed panel container of detail pages.
//!
//! Hidden panels are left out of the tab strip and only the active panel's
//! content is mounted. The last selected panel is remembered per page key.

use crate::shared::icons::icon;
use crate::shared::storage;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone)]
pub struct PanelType {
    pub name: &'static str,
    pub label: String,
    pub icon: &'static str,
    pub content: ViewFn,
    pub hidden: bool,
}

impl PanelType {
    pub fn new(
        name: &'static str,
        label: impl Into<String>,
        icon: &'static str,
        content: impl Into<ViewFn>,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            icon,
            content: content.into(),
            hidden: false,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

pub fn visible_names(panels: &[PanelType]) -> Vec<&'static str> {
    panels.iter().filter(|p| !p.hidden).map(|p| p.name).collect()
}

/// The wanted panel if it is visible, else the first visible one
pub fn select_panel(visible: &[&'static str], wanted: Option<&str>) -> Option<&'static str> {
    wanted
        .and_then(|w| visible.iter().copied().find(|name| *name == w))
        .or_else(|| visible.first().copied())
}

fn storage_key(page_key: &str) -> String {
    format!("panel-{}", page_key)
}

#[component]
pub fn PanelGroup(
    /// Key under which the selected panel is remembered, e.g. `"stocklocation"`
    page_key: &'static str,
    #[prop(into)] panels: Signal<Vec<PanelType>>,
    /// Panel to show when nothing was remembered
    #[prop(optional, into)]
    default_panel: Option<String>,
) -> impl IntoView {
    let wanted = RwSignal::new(storage::get_item(&storage_key(page_key)).or(default_panel));

    let active = Memo::new(move |_| {
        let visible = panels.with(|p| visible_names(p));
        wanted.with(|w| select_panel(&visible, w.as_deref()))
    });

    let set_panel = move |name: &'static str| {
        log::debug!("{}: panel {}", page_key, name);
        storage::set_item(&storage_key(page_key), name);
        wanted.set(Some(name.to_string()));
    };

    view! {
        <div class="panel-group">
            <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="panel-group__tabs">
                <For
                    each={move || panels.get().into_iter().filter(|p| !p.hidden).collect::<Vec<_>>()}
                    key=|panel| panel.name
                    children=move |panel| {
                        let name = panel.name;
                        view! {
                            <Button
                                appearance=Signal::derive(move || {
                                    if active.get() == Some(name) {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Subtle
                                    }
                                })
                                size=ButtonSize::Small
                                on_click=move |_| set_panel(name)
                            >
                                <span class="tab-icon">{icon(panel.icon)}</span>
                                {panel.label.clone()}
                            </Button>
                        }
                    }
                />
            </Flex>
            <div class="panel-group__content">
                {move || {
                    let name = active.get()?;
                    let content = panels
                        .with_untracked(|p| p.iter().find(|panel| panel.name == name).map(|p| p.content.clone()))?;
                    Some(content.run())
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_panel_is_used_when_visible() {
        let visible = vec!["details", "sublocations", "stock-items"];
        assert_eq!(select_panel(&visible, Some("stock-items")), Some("stock-items"));
    }

    #[test]
    fn test_hidden_or_unknown_panel_falls_back_to_first() {
        let visible = vec!["details", "sublocations"];
        assert_eq!(select_panel(&visible, Some("default_parts")), Some("details"));
        assert_eq!(select_panel(&visible, None), Some("details"));
        assert_eq!(select_panel(&[], Some("details")), None);
    }

    #[test]
    fn test_hidden_panels_never_in_strip() {
        let panels = vec![
            PanelType::new("details", "Location Details", "info", || ()),
            PanelType::new("default_parts", "Default Parts", "part", || ()).hidden(true),
            PanelType::new("sublocations", "Stock Locations", "sitemap", || ()),
        ];
        assert_eq!(visible_names(&panels), vec!["details", "sublocations"]);
    }
}
