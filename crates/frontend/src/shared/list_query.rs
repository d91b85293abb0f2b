//! Loader behind the embedded tables.
//!
//! The whole filtered collection is fetched once per filter change; search
//! and paging happen on the client.

use crate::shared::api::use_api;
use crate::shared::config::AppConfig;
use crate::shared::instance::FetchGuard;
use crate::shared::list_utils::{filter_list, page_slice, total_pages, Searchable};
use contracts::domain::common::ApiEndpoint;
use contracts::shared::list_response::ListResponse;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;

const DEFAULT_PAGE_SIZE: usize = 25;

pub struct ListQuery<T: Send + Sync + 'static> {
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub search: RwSignal<String>,
    /// 0-indexed
    pub page: RwSignal<usize>,
    pub page_size: usize,
    trigger: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ListQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListQuery<T> {}

impl<T: Searchable + Clone + Send + Sync + 'static> ListQuery<T> {
    pub fn refresh(&self) {
        self.trigger.update(|n| *n += 1);
    }

    pub fn set_search(&self, text: String) {
        self.search.set(text);
        self.page.set(0);
    }

    /// Rows matching the search box, tracked
    pub fn filtered(&self) -> Vec<T> {
        let search = self.search.get();
        filter_list(self.items.get(), &search)
    }

    pub fn visible_rows(&self) -> Vec<T> {
        page_slice(&self.filtered(), self.page.get(), self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered().len(), self.page_size)
    }
}

/// Fetches `endpoint` with `filters` as query string, again whenever they change
pub fn use_list_query<T, F>(endpoint: ApiEndpoint, filters: Signal<F>) -> ListQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    F: Serialize + Clone + Send + Sync + 'static,
{
    let api = use_api();
    let page_size = use_context::<AppConfig>()
        .map(|c| c.ui.page_size)
        .filter(|size| *size > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let query = ListQuery {
        items: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
        error: RwSignal::new(None),
        search: RwSignal::new(String::new()),
        page: RwSignal::new(0),
        page_size,
        trigger: RwSignal::new(0),
    };

    let guard = FetchGuard::new();
    on_cleanup({
        let guard = guard.clone();
        move || guard.cancel()
    });

    Effect::new(move |_| {
        let filters = filters.get();
        query.trigger.track();
        let generation = guard.begin();
        query.loading.set(true);
        query.error.set(None);

        let api = api.clone();
        let guard = guard.clone();
        spawn_local(async move {
            let result: Result<ListResponse<T>, _> =
                api.get_filtered(&endpoint.url(None), &filters).await;
            if !guard.is_current(generation) {
                return;
            }
            match result {
                Ok(response) => {
                    query.items.set(response.into_items());
                    query.page.set(0);
                }
                Err(e) => {
                    log::error!("failed to load {}: {}", endpoint.path(), e);
                    query.items.set(Vec::new());
                    query.error.set(Some(e.to_string()));
                }
            }
            query.loading.set(false);
        });
    });

    query
}
