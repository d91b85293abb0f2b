use crate::shared::actions::{ActionDropdown, ActionItem};
use crate::shared::api::{use_api, ApiError};
use crate::shared::modal_frame::ModalSize;
use crate::shared::modal_stack::{use_modal_stack, ModalHandle};
use contracts::domain::common::{ApiEndpoint, ModelType};
use contracts::usecases::u101_barcode_scan::scan::{barcode_unlink_body, BarcodeLinkRequest};
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Barcode menu of a record: view its barcode, link / unlink a custom
/// barcode, plus page-specific scan actions.
#[component]
pub fn BarcodeActionDropdown(
    model: ModelType,
    pk: i64,
    /// A custom barcode is linked to the record
    #[prop(optional)]
    linked: bool,
    /// May link / unlink
    perm: bool,
    #[prop(optional)] actions: Vec<ActionItem>,
    /// Runs after a barcode was linked or unlinked
    on_change: Callback<()>,
) -> impl IntoView {
    let modal = use_modal_stack();

    let view_barcode = Callback::new(move |_: ()| {
        modal.push("View Barcode", ModalSize::Small, move |handle| {
            view! { <BarcodeDataView model=model pk=pk handle=handle /> }.into_any()
        });
    });
    let link_barcode = Callback::new(move |_: ()| {
        modal.push("Link Barcode", ModalSize::Small, move |handle| {
            view! { <LinkBarcodeView model=model pk=pk handle=handle on_change=on_change /> }
                .into_any()
        });
    });
    let unlink_barcode = Callback::new(move |_: ()| {
        modal.push("Unlink Barcode", ModalSize::Small, move |handle| {
            view! { <UnlinkBarcodeView model=model pk=pk handle=handle on_change=on_change /> }
                .into_any()
        });
    });

    let mut items = vec![
        ActionItem::new("View", "qrcode", view_barcode).tooltip("View barcode"),
        ActionItem::new("Link Barcode", "link", link_barcode)
            .tooltip("Link a custom barcode")
            .hidden(linked || !perm),
        ActionItem::new("Unlink Barcode", "unlink", unlink_barcode)
            .tooltip("Unlink the custom barcode")
            .hidden(!linked || !perm),
    ];
    items.extend(actions);

    view! { <ActionDropdown tooltip="Barcode Actions" icon_name="barcode" actions=items /> }
}

/// Data encoded in the record's default barcode
pub fn default_barcode_data(model: ModelType, pk: i64) -> String {
    let mut data = serde_json::Map::new();
    data.insert(model.name().to_string(), Value::from(pk));
    Value::Object(data).to_string()
}

#[component]
fn BarcodeDataView(model: ModelType, pk: i64, handle: ModalHandle) -> impl IntoView {
    let data = default_barcode_data(model, pk);
    view! {
        <div class="barcode-view">
            <pre class="barcode-view__data">{data}</pre>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                "Close"
            </Button>
        </div>
    }
}

fn error_text(e: &ApiError) -> String {
    match e.server_errors() {
        Some(errors) if !errors.is_empty() => errors.summary(),
        _ => e.to_string(),
    }
}

#[component]
fn LinkBarcodeView(
    model: ModelType,
    pk: i64,
    handle: ModalHandle,
    on_change: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let barcode = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = move |_: leptos::ev::MouseEvent| {
        let code = barcode.get_untracked().trim().to_string();
        if code.is_empty() {
            error.set(Some("Enter a barcode".to_string()));
            return;
        }
        busy.set(true);
        let body = BarcodeLinkRequest {
            barcode: code,
            model,
            pk,
        }
        .to_body();
        let api = api.clone();
        spawn_local(async move {
            let result: Result<Value, ApiError> =
                api.post(&ApiEndpoint::BarcodeLink.url(None), &body).await;
            let _ = busy.try_set(false);
            match result {
                Ok(_) => {
                    handle.close();
                    on_change.run(());
                }
                Err(e) => {
                    log::error!("failed to link barcode to {} #{}: {}", model.name(), pk, e);
                    let _ = error.try_set(Some(error_text(&e)));
                }
            }
        });
    };

    view! {
        <div class="barcode-link">
            {move || error.get().map(|e| view! { <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar> })}
            <div class="form__group">
                <label class="form__label">"Barcode"</label>
                <Input value=barcode placeholder="Scan or enter barcode data" />
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || busy.get())
                on_click=submit
            >
                "Link"
            </Button>
        </div>
    }
}

#[component]
fn UnlinkBarcodeView(
    model: ModelType,
    pk: i64,
    handle: ModalHandle,
    on_change: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = move |_: leptos::ev::MouseEvent| {
        busy.set(true);
        let api = api.clone();
        spawn_local(async move {
            let body = barcode_unlink_body(model, pk);
            let result: Result<Value, ApiError> =
                api.post(&ApiEndpoint::BarcodeUnlink.url(None), &body).await;
            let _ = busy.try_set(false);
            match result {
                Ok(_) => {
                    handle.close();
                    on_change.run(());
                }
                Err(e) => {
                    log::error!("failed to unlink barcode of {} #{}: {}", model.name(), pk, e);
                    let _ = error.try_set(Some(error_text(&e)));
                }
            }
        });
    };

    view! {
        <div class="barcode-link">
            {move || error.get().map(|e| view! { <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar> })}
            <p>"Remove the custom barcode linked to this item?"</p>
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || busy.get())
                    on_click=submit
                >
                    "Unlink"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                    "Cancel"
                </Button>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_barcode_data() {
        assert_eq!(
            default_barcode_data(ModelType::StockLocation, 7),
            json!({"stocklocation": 7}).to_string()
        );
    }
}
