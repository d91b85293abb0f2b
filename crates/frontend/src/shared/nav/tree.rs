use crate::shared::api::{use_api, ApiClient, ApiError};
use crate::shared::icons::icon;
use contracts::domain::a001_stock_location::aggregate::{location_url, StockLocationId};
use contracts::domain::a001_stock_location::tree::{
    build_location_tree, path_to, LocationTreeEntry, LocationTreeNode,
};
use contracts::domain::common::ApiEndpoint;
use contracts::shared::list_response::ListResponse;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

async fn fetch_tree(api: &ApiClient) -> Result<Vec<LocationTreeNode>, ApiError> {
    let entries: ListResponse<LocationTreeEntry> = api
        .get(&ApiEndpoint::StockLocationTree.url(None), &[])
        .await?;
    Ok(build_location_tree(entries.into_items()))
}

/// Side drawer with the whole location hierarchy.
///
/// The tree is fetched every time the drawer opens; the path down to
/// `selected` starts expanded.
#[component]
pub fn NavigationTree(
    #[prop(into)] title: String,
    opened: RwSignal<bool>,
    #[prop(into)] selected: Signal<Option<i64>>,
) -> impl IntoView {
    let nodes = RwSignal::new(None::<Vec<LocationTreeNode>>);
    let error = RwSignal::new(None::<String>);
    let expanded = RwSignal::new(HashSet::<StockLocationId>::new());
    let navigate = use_navigate();
    let api = use_api();

    Effect::new(move |_| {
        if !opened.get() {
            return;
        }
        nodes.set(None);
        error.set(None);
        let api = api.clone();
        spawn_local(async move {
            match fetch_tree(&api).await {
                Ok(tree) => {
                    let path = selected
                        .get_untracked()
                        .map(|pk| path_to(&tree, StockLocationId(pk)))
                        .unwrap_or_default();
                    let _ = expanded.try_update(|e| e.extend(path));
                    let _ = nodes.try_set(Some(tree));
                }
                Err(e) => {
                    log::error!("failed to load location tree: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    });

    let on_select = Callback::new(move |pk: StockLocationId| {
        let url = location_url(pk);
        log::debug!("tree: navigate to {}", url);
        opened.set(false);
        navigate(&url, NavigateOptions::default());
    });

    view! {
        <Show when=move || opened.get()>
            <div class="nav-tree__backdrop" on:click=move |_| opened.set(false)></div>
            <aside class="nav-tree">
                <div class="nav-tree__header">
                    <h3>{title.clone()}</h3>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| opened.set(false)
                    >
                        "×"
                    </Button>
                </div>
                {move || error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}
                {move || match nodes.get() {
                    None if error.with(|e| e.is_none()) => view! { <Spinner /> }.into_any(),
                    None => ().into_any(),
                    Some(tree) => render_nodes(tree, 0, expanded, selected, on_select),
                }}
            </aside>
        </Show>
    }
}

fn render_nodes(
    nodes: Vec<LocationTreeNode>,
    level: usize,
    expanded: RwSignal<HashSet<StockLocationId>>,
    selected: Signal<Option<i64>>,
    on_select: Callback<StockLocationId>,
) -> AnyView {
    nodes
        .into_iter()
        .map(|node| {
            let pk = node.entry.pk;
            let has_children = !node.children.is_empty();
            let is_open = move || expanded.with(|e| e.contains(&pk));
            let is_selected = move || selected.get() == Some(pk.0);
            let children = node.children;
            let entry_icon = node.entry.icon.clone().filter(|i| !i.is_empty());

            view! {
                <div
                    class=move || if is_selected() { "nav-tree__row nav-tree__row--selected" } else { "nav-tree__row" }
                    style=format!("padding-left: {}px", level * 16)
                >
                    {if has_children {
                        view! {
                            <span
                                class="nav-tree__toggle"
                                on:click=move |_| expanded.update(|e| {
                                    if !e.remove(&pk) {
                                        e.insert(pk);
                                    }
                                })
                            >
                                {move || icon(if is_open() { "chevron-down" } else { "chevron-right" })}
                            </span>
                        }
                        .into_any()
                    } else {
                        view! { <span class="nav-tree__toggle"></span> }.into_any()
                    }}
                    <span class="nav-tree__icon">
                        {match entry_icon {
                            Some(name) => icon(&name),
                            None => icon(if node.entry.structural { "folder-closed" } else { "location" }),
                        }}
                    </span>
                    <a class="nav-tree__label" on:click=move |_| on_select.run(pk)>
                        {node.entry.name.clone()}
                    </a>
                </div>
                {move || {
                    (has_children && is_open())
                        .then(|| render_nodes(children.clone(), level + 1, expanded, selected, on_select))
                }}
            }
        })
        .collect_view()
        .into_any()
}
