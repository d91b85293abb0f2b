use crate::routes::routes::AppRoutes;
use crate::shared::api::ApiClient;
use crate::shared::config::AppConfig;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::system::user_state::UserStateProvider;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // The API handle is created once here and handed down through context;
    // components never build their own client.
    let api = ApiClient::from_config(&config);
    provide_context(api.clone());
    provide_context(config);

    // Centralized modal stack for forms and scan dialogs
    provide_context(ModalStackService::new());

    view! {
        <UserStateProvider api=api>
            <AppRoutes />
            <ModalHost />
        </UserStateProvider>
    }
}
