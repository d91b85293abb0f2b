use super::fields::ApiFormField;
use super::view::{ApiFormView, FormMethod};
use crate::shared::modal_frame::ModalSize;
use crate::shared::modal_stack::{use_modal_stack, CloseGuard};
use contracts::domain::common::ApiEndpoint;
use leptos::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiFormProps {
    pub endpoint: ApiEndpoint,
    pub pk: Signal<Option<i64>>,
    pub title: String,
    pub fields: Vec<ApiFormField>,
    /// Receives the server's response body (null for a delete)
    pub on_form_success: Callback<Value>,
    /// Text above the fields
    pub preamble: Option<String>,
}

/// Opener of a modal form
#[derive(Clone, Copy)]
pub struct FormModal {
    open: Callback<()>,
}

impl FormModal {
    pub fn open(&self) {
        self.open.run(());
    }

    pub fn callback(&self) -> Callback<()> {
        self.open
    }
}

fn use_api_form_modal(props: ApiFormProps, method: FormMethod) -> FormModal {
    let modal = use_modal_stack();
    let props = StoredValue::new(props);

    let open = Callback::new(move |_: ()| {
        let props = props.get_value();
        let Some(pk) = props.pk.get_untracked() else {
            log::warn!("'{}' opened without a record", props.title);
            return;
        };

        let busy = Arc::new(AtomicBool::new(false));
        let guard: CloseGuard = {
            let busy = busy.clone();
            Arc::new(move || !busy.load(Ordering::SeqCst))
        };

        let title = props.title.clone();
        modal.push_guarded(title, ModalSize::Medium, Some(guard), move |handle| {
            let props = props.clone();
            view! {
                <ApiFormView
                    method=method
                    endpoint=props.endpoint
                    pk=pk
                    fields=props.fields
                    preamble=props.preamble
                    on_success=props.on_form_success
                    handle=handle
                    busy=busy.clone()
                />
            }
            .into_any()
        });
    });

    FormModal { open }
}

/// PATCH form for the record at `endpoint/<pk>/`, prefilled from the server
pub fn use_edit_api_form_modal(props: ApiFormProps) -> FormModal {
    use_api_form_modal(props, FormMethod::Patch)
}

/// Confirmation form issuing DELETE on `endpoint/<pk>/`, with the field values as body
pub fn use_delete_api_form_modal(props: ApiFormProps) -> FormModal {
    use_api_form_modal(props, FormMethod::Delete)
}
