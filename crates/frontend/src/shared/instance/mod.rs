//! Single-resource loader used by detail pages.
//!
//! `use_instance` fetches one record by pk, keeps the last good value while a
//! refresh is in flight and drops responses that were superseded by a later
//! refresh or that arrive after the page unmounted.

mod guard;
mod state;

pub use guard::FetchGuard;
pub use state::InstanceState;

use crate::shared::api::{use_api, ApiError};
use contracts::domain::common::ApiEndpoint;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;

pub struct InstanceQuery<T: Send + Sync + 'static> {
    pub state: RwSignal<InstanceState<T>>,
    /// A request is in flight (first load or refresh)
    pub fetching: RwSignal<bool>,
    /// The record was changed outside this loader and has not been re-read
    pub stale: RwSignal<bool>,
    trigger: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for InstanceQuery<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for InstanceQuery<T> {}

impl<T: Clone + Send + Sync + 'static> InstanceQuery<T> {
    /// Re-issues the fetch; the result replaces the cached value in one write
    pub fn refresh(&self) {
        self.trigger.update(|n| *n += 1);
    }

    pub fn value(&self) -> Option<T> {
        self.state.with(|s| s.value().cloned())
    }

    pub fn refresh_callback(&self) -> Callback<()> {
        let query = *self;
        Callback::new(move |_| query.refresh())
    }
}

/// Text shown in place of a record that could not be loaded
pub fn load_error_message(error: &ApiError) -> String {
    if error.is_forbidden() {
        "You do not have permission to view this record".to_string()
    } else {
        error.to_string()
    }
}

/// Loads `endpoint/<pk>/` with `params` whenever `pk` changes or `refresh()` is called.
///
/// Without a pk nothing is fetched and the state stays `NotLoaded`.
pub fn use_instance<T>(
    endpoint: ApiEndpoint,
    pk: Signal<Option<i64>>,
    params: Vec<(&'static str, String)>,
) -> InstanceQuery<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let api = use_api();
    let query = InstanceQuery {
        state: RwSignal::new(InstanceState::NotLoaded),
        fetching: RwSignal::new(false),
        stale: RwSignal::new(false),
        trigger: RwSignal::new(0),
    };

    let guard = FetchGuard::new();
    on_cleanup({
        let guard = guard.clone();
        move || guard.cancel()
    });

    Effect::new(move |_| {
        let pk = pk.get();
        query.trigger.track();

        let Some(pk) = pk else {
            guard.begin();
            query.state.set(InstanceState::NotLoaded);
            query.fetching.set(false);
            query.stale.set(false);
            return;
        };

        let generation = guard.begin();
        let first_load = query.state.with_untracked(|s| s.key() != Some(pk));
        if first_load {
            query.state.set(InstanceState::Loading);
        }
        query.fetching.set(true);
        log::debug!("fetching {} #{} (generation {})", endpoint.path(), pk, generation);

        let api = api.clone();
        let guard = guard.clone();
        let params = params.clone();
        spawn_local(async move {
            let result = api
                .get::<T>(&endpoint.url(Some(pk)), &params)
                .await;
            if !guard.is_current(generation) {
                log::debug!("discarding response for {} #{}", endpoint.path(), pk);
                return;
            }
            match result {
                Ok(value) => {
                    query.state.set(InstanceState::Loaded { pk, value });
                    query.stale.set(false);
                }
                Err(e) => {
                    log::error!("failed to load {} #{}: {}", endpoint.path(), pk, e);
                    query.state.set(InstanceState::Failed {
                        pk,
                        error: load_error_message(&e),
                    });
                }
            }
            query.fetching.set(false);
        });
    });

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::server_errors::ServerErrors;

    #[test]
    fn test_load_error_message() {
        let forbidden = ApiError::Http {
            status: 403,
            errors: ServerErrors::default(),
        };
        assert_eq!(
            load_error_message(&forbidden),
            "You do not have permission to view this record"
        );
        assert_eq!(load_error_message(&ApiError::NotFound), "Not found");
    }
}
