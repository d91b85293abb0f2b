use super::machine::{reduce, ScanDialogState, ScanEvent, ScanMessage, ScanOutcome, ScanPhase};
use crate::shared::api::{use_api, ApiClient, ApiError};
use crate::shared::modal_frame::ModalSize;
use crate::shared::modal_stack::{use_modal_stack, ModalHandle};
use contracts::domain::common::{ApiEndpoint, ModelType};
use contracts::usecases::u101_barcode_scan::scan::{
    BarcodeScanRequest, BarcodeScanResponse, ResolvedBarcode,
};
use leptos::prelude::*;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

pub type ScanFuture = Pin<Box<dyn Future<Output = ScanOutcome>>>;

/// Follow-up run with the scanned code and the resolved instance
pub type ScanCallback = Arc<dyn Fn(String, ResolvedBarcode) -> ScanFuture + Send + Sync>;

#[derive(Clone)]
pub struct ScanDialogProps {
    pub title: String,
    /// Model kind the code must resolve to
    pub model_type: ModelType,
    pub callback: ScanCallback,
}

#[derive(Clone, Copy)]
pub struct ScanDialog {
    pub state: RwSignal<ScanDialogState>,
    open: Callback<()>,
}

impl ScanDialog {
    pub fn open(&self) {
        self.open.run(());
    }

    pub fn callback(&self) -> Callback<()> {
        self.open
    }
}

fn dispatch(state: RwSignal<ScanDialogState>, event: ScanEvent) {
    let _ = state.try_update(|s| *s = reduce(s, event));
}

pub fn use_barcode_scan_dialog(props: ScanDialogProps) -> ScanDialog {
    let modal = use_modal_stack();
    let state = RwSignal::new(ScanDialogState::default());
    let props = StoredValue::new(props);

    let open = Callback::new(move |_: ()| {
        if state.with_untracked(|s| s.is_open()) {
            return;
        }
        dispatch(state, ScanEvent::Open);
        let title = props.with_value(|p| p.title.clone());
        modal.push(title, ModalSize::Small, move |handle| {
            view! { <ScanDialogView props=props.get_value() state=state handle=handle /> }.into_any()
        });
    });

    ScanDialog { state, open }
}

/// Posts the code to the barcode endpoint and resolves it to `expected`
async fn resolve_code(
    api: &ApiClient,
    code: &str,
    expected: ModelType,
) -> Result<ResolvedBarcode, String> {
    let request = BarcodeScanRequest {
        barcode: code.to_string(),
    };
    let response: Result<BarcodeScanResponse, ApiError> =
        api.post(&ApiEndpoint::BarcodeScan.url(None), &request).await;
    match response {
        Ok(response) => response.resolve(expected),
        // No-match is reported as a 400 carrying {"error": ...}
        Err(ApiError::Http { errors, .. }) if !errors.non_field.is_empty() => {
            Err(errors.non_field.join("; "))
        }
        Err(e) => Err(e.to_string()),
    }
}

#[component]
fn ScanDialogView(
    props: ScanDialogProps,
    state: RwSignal<ScanDialogState>,
    handle: ModalHandle,
) -> impl IntoView {
    let api = use_api();
    let code = RwSignal::new(String::new());

    // Dismissal through the overlay or Escape also closes the machine
    on_cleanup(move || dispatch(state, ScanEvent::Close));

    let submit = Callback::new(move |_: ()| {
        dispatch(state, ScanEvent::Submit(code.get_untracked()));
        let (attempt, scanned) = match state.get_untracked() {
            ScanDialogState {
                phase: ScanPhase::Resolving { code: pending },
                attempt,
                ..
            } => (attempt, pending),
            _ => return,
        };
        code.set(String::new());

        let api = api.clone();
        let callback = props.callback.clone();
        let expected = props.model_type;
        spawn_local(async move {
            log::debug!("resolving barcode '{}' as {}", scanned, expected.name());
            match resolve_code(&api, &scanned, expected).await {
                Err(error) => {
                    log::warn!("barcode '{}' not resolved: {}", scanned, error);
                    dispatch(state, ScanEvent::ResolveFailed { attempt, error });
                }
                Ok(resolved) => {
                    let outcome = callback(scanned, resolved).await;
                    dispatch(state, ScanEvent::CallbackFinished { attempt, outcome });
                }
            }
        });
    });

    let message = move || {
        state.with(|s| {
            s.message.clone().map(|m| match m {
                ScanMessage::Success(text) => view! {
                    <MessageBar intent=MessageBarIntent::Success>{text}</MessageBar>
                }
                .into_any(),
                ScanMessage::Error(text) => view! {
                    <MessageBar intent=MessageBarIntent::Error>{text}</MessageBar>
                }
                .into_any(),
            })
        })
    };

    view! {
        <div class="scan-dialog">
            {message}
            <Show when=move || state.with(|s| s.is_busy())>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Spinner />
                    <span>"Checking barcode..."</span>
                </Flex>
            </Show>
            <div
                class="form__group"
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        submit.run(());
                    }
                }
            >
                <label class="form__label">"Barcode"</label>
                <Input value=code placeholder="Scan or enter barcode data" attr:autofocus=true />
            </div>
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Medium
                    disabled=Signal::derive(move || !state.with(|s| s.accepts_input()))
                    on_click=move |_| submit.run(())
                >
                    "Scan"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Medium
                    on_click=move |_| {
                        dispatch(state, ScanEvent::Close);
                        handle.close();
                    }
                >
                    "Close"
                </Button>
            </Flex>
        </div>
    }
}
