//! Label and report printing. Templates are rendered by the server; the
//! client picks one, requests the output and opens it.

use crate::shared::actions::{ActionDropdown, ActionItem};
use crate::shared::api::{use_api, ApiClient, ApiError};
use crate::shared::modal_frame::ModalSize;
use crate::shared::modal_stack::{use_modal_stack, ModalHandle};
use contracts::domain::common::ModelType;
use contracts::shared::list_response::ListResponse;
use contracts::usecases::u103_printing::templates::{
    template_query, PrintKind, PrintRequest, PrintResponse, TemplateSummary,
};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn PrintingActions(
    model_type: ModelType,
    #[prop(into)] items: Signal<Vec<i64>>,
    #[prop(optional, into)] hidden: MaybeProp<bool>,
    #[prop(optional)] enable_labels: bool,
    #[prop(optional)] enable_reports: bool,
) -> impl IntoView {
    let modal = use_modal_stack();

    let open = move |kind: PrintKind| {
        Callback::new(move |_: ()| {
            let items = items.get_untracked();
            modal.push(kind.label(), ModalSize::Small, move |handle| {
                view! { <PrintDialog kind=kind model_type=model_type items=items.clone() handle=handle /> }
                    .into_any()
            });
        })
    };

    let actions = vec![
        ActionItem::new("Print Labels", "print", open(PrintKind::Label)).hidden(!enable_labels),
        ActionItem::new("Print Reports", "print", open(PrintKind::Report)).hidden(!enable_reports),
    ];

    view! {
        <Show when=move || !hidden.get().unwrap_or(false)>
            <ActionDropdown tooltip="Printing Actions" icon_name="print" actions=actions.clone() />
        </Show>
    }
}

/// Absolute URL of a generated output; the server returns media paths
pub fn output_url(api: &ApiClient, output: &str) -> String {
    if output.starts_with("http://") || output.starts_with("https://") {
        output.to_string()
    } else {
        api.url(output)
    }
}

#[component]
fn PrintDialog(
    kind: PrintKind,
    model_type: ModelType,
    items: Vec<i64>,
    handle: ModalHandle,
) -> impl IntoView {
    let api = use_api();
    let templates = RwSignal::new(None::<Vec<TemplateSummary>>);
    let selected = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let printing = RwSignal::new(false);

    {
        let api = api.clone();
        spawn_local(async move {
            let result: Result<ListResponse<TemplateSummary>, ApiError> = api
                .get(&kind.template_endpoint().url(None), &template_query(model_type))
                .await;
            match result {
                Ok(list) => {
                    let list: Vec<_> = list.into_items().into_iter().filter(|t| t.enabled).collect();
                    if let Some(first) = list.first() {
                        let _ = selected.try_set(first.pk.to_string());
                    }
                    let _ = templates.try_set(Some(list));
                }
                Err(e) => {
                    log::error!("failed to load {:?} templates: {}", kind, e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    }

    let print = move |_: leptos::ev::MouseEvent| {
        let Ok(template) = selected.get_untracked().parse::<i64>() else {
            error.set(Some("Select a template".to_string()));
            return;
        };
        error.set(None);
        printing.set(true);
        let request = PrintRequest {
            template,
            items: items.clone(),
        };
        let api = api.clone();
        spawn_local(async move {
            let result: Result<PrintResponse, ApiError> =
                api.post(&kind.print_endpoint().url(None), &request).await;
            let _ = printing.try_set(false);
            match result {
                Ok(PrintResponse {
                    output: Some(output),
                    ..
                }) => {
                    let url = output_url(&api, &output);
                    log::info!("print output ready: {}", url);
                    if let Some(window) = web_sys::window() {
                        if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                            log::error!("failed to open {}: {:?}", url, e);
                        }
                    }
                    handle.close();
                }
                Ok(response) => {
                    let _ = notice.try_set(Some(format!(
                        "Output #{} is being generated",
                        response.pk
                    )));
                }
                Err(e) => {
                    log::error!("print request failed: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="print-dialog">
            {move || error.get().map(|e| view! { <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar> })}
            {move || notice.get().map(|n| view! { <MessageBar intent=MessageBarIntent::Info>{n}</MessageBar> })}
            {move || match templates.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(list) if list.is_empty() => view! {
                    <p>"No templates available"</p>
                }
                .into_any(),
                Some(list) => view! {
                    <div class="form__group">
                        <label class="form__label">"Template"</label>
                        <Select value=selected>
                            {list
                                .into_iter()
                                .map(|t| view! { <option value=t.pk.to_string()>{t.name}</option> })
                                .collect_view()}
                        </Select>
                    </div>
                }
                .into_any(),
            }}
            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || {
                        printing.get() || templates.with(|t| t.as_ref().map(Vec::is_empty).unwrap_or(true))
                    })
                    on_click=print
                >
                    "Print"
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

    #[test]
    fn test_output_url() {
        let api = ApiClient::new("http://inv.local:8000");
        assert_eq!(
            output_url(&api, "/media/label/output.pdf"),
            "http://inv.local:8000/media/label/output.pdf"
        );
        assert_eq!(
            output_url(&api, "https://cdn.example.com/x.pdf"),
            "https://cdn.example.com/x.pdf"
        );
    }
}
