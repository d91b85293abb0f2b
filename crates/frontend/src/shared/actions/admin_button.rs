use crate::shared::icons::icon;
use crate::system::user_state::use_user_state;
use contracts::domain::common::ModelType;
use leptos::prelude::*;
use thaw::*;

/// Opens the record in the server's admin site; staff only.
#[component]
pub fn AdminButton(model: ModelType, #[prop(into)] pk: Signal<Option<i64>>) -> impl IntoView {
    let user = use_user_state();

    view! {
        <Show when=move || user.is_staff() && pk.get().is_some()>
            <Button
                appearance=ButtonAppearance::Subtle
                size=ButtonSize::Small
                attr:title="Open in admin interface"
                on_click=move |_| {
                    let Some(pk) = pk.get_untracked() else { return };
                    let url = model.admin_url(pk);
                    if let Some(window) = web_sys::window() {
                        if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                            log::error!("failed to open {}: {:?}", url, e);
                        }
                    }
                }
            >
                {icon("admin")}
            </Button>
        </Show>
    }
}
