use super::fields::{build_body, choice_key, initial_input, ApiFormField, FormFieldKind};
use super::state::FormModalState;
use crate::shared::api::{use_api, ApiError};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalHandle;
use contracts::domain::common::ApiEndpoint;
use contracts::shared::list_response::ListResponse;
use leptos::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Patch,
    Delete,
}

#[derive(Clone, Copy)]
enum FieldInput {
    Text(RwSignal<String>),
    Flag(RwSignal<bool>),
}

impl FieldInput {
    fn for_field(field: &ApiFormField) -> Self {
        match field.kind {
            FormFieldKind::Boolean => FieldInput::Flag(RwSignal::new(false)),
            _ => FieldInput::Text(RwSignal::new(String::new())),
        }
    }

    fn set(&self, raw: String) {
        match self {
            FieldInput::Text(s) => s.set(raw),
            FieldInput::Flag(f) => f.set(raw == "true"),
        }
    }

    fn raw(&self) -> String {
        match self {
            FieldInput::Text(s) => s.get_untracked(),
            FieldInput::Flag(f) => f.get_untracked().to_string(),
        }
    }
}

#[component]
pub fn ApiFormView(
    method: FormMethod,
    endpoint: ApiEndpoint,
    pk: i64,
    fields: Vec<ApiFormField>,
    preamble: Option<String>,
    on_success: Callback<Value>,
    handle: ModalHandle,
    busy: Arc<AtomicBool>,
) -> impl IntoView {
    let api = use_api();
    let url = endpoint.url(Some(pk));
    let state = RwSignal::new(FormModalState::default());
    let loading = RwSignal::new(method == FormMethod::Patch);
    let inputs: Vec<FieldInput> = fields.iter().map(FieldInput::for_field).collect();
    let names: Vec<&'static str> = fields.iter().map(|f| f.name).collect();

    let fill = {
        let fields = fields.clone();
        let inputs = inputs.clone();
        move |record: &Value| {
            for (field, input) in fields.iter().zip(&inputs) {
                input.set(initial_input(field, record));
            }
        }
    };

    match method {
        FormMethod::Delete => fill(&Value::Null),
        FormMethod::Patch => {
            let api = api.clone();
            let url = url.clone();
            spawn_local(async move {
                match api.get::<Value>(&url, &[]).await {
                    Ok(record) => fill(&record),
                    Err(e) => {
                        log::error!("failed to load form values from {}: {}", url, e);
                        let _ = state.try_update(|s| s.non_field_errors.push(e.to_string()));
                    }
                }
                let _ = loading.try_set(false);
            });
        }
    }

    let submit = {
        let fields = fields.clone();
        let inputs = inputs.clone();
        move |_: leptos::ev::MouseEvent| {
            if state.with_untracked(|s| s.submitting) {
                return;
            }
            state.update(|s| s.start_submit());
            let raws: Vec<String> = inputs.iter().map(FieldInput::raw).collect();
            let body = match build_body(&fields, &raws) {
                Ok(body) => body,
                Err(errors) => {
                    state.update(|s| s.apply_local_errors(errors));
                    return;
                }
            };

            busy.store(true, Ordering::SeqCst);
            let api = api.clone();
            let url = url.clone();
            let names = names.clone();
            let busy = busy.clone();
            spawn_local(async move {
                let result: Result<Value, ApiError> = match method {
                    FormMethod::Patch => api.patch(&url, &body).await,
                    FormMethod::Delete => api.delete(&url, Some(&body)).await.map(|_| Value::Null),
                };
                busy.store(false, Ordering::SeqCst);
                match result {
                    Ok(response) => {
                        log::info!("{:?} {} succeeded", method, url);
                        let _ = state.try_update(|s| s.finish());
                        handle.close();
                        on_success.run(response);
                    }
                    Err(e) => {
                        log::error!("{:?} {} failed: {}", method, url, e);
                        let _ = state.try_update(|s| s.apply_error(&e, &names));
                    }
                }
            });
        }
    };

    let (submit_text, form_class) = match method {
        FormMethod::Patch => ("Submit", "api-form"),
        FormMethod::Delete => ("Delete", "api-form api-form--delete"),
    };

    view! {
        <div class=form_class>
            {preamble.map(|text| view! { <p class="api-form__preamble">{text}</p> })}
            <Show when=move || loading.get()>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Spinner />
                    <span>"Loading..."</span>
                </Flex>
            </Show>
            <Show when=move || state.with(|s| !s.non_field_errors.is_empty())>
                <MessageBar intent=MessageBarIntent::Error>
                    <ul class="api-form__errors">
                        {move || {
                            state
                                .get()
                                .non_field_errors
                                .into_iter()
                                .map(|e| view! { <li>{e}</li> })
                                .collect_view()
                        }}
                    </ul>
                </MessageBar>
            </Show>
            {fields
                .into_iter()
                .zip(inputs)
                .map(|(field, input)| {
                    let name = field.name;
                    view! {
                        <div class="form__group">
                            <label class="form__label">
                                {field.label.clone()}
                                {field.required.then_some(" *")}
                            </label>
                            <FieldEditor field=field.clone() input=input />
                            {field.description.clone().map(|d| view! { <div class="form__hint">{d}</div> })}
                            {move || {
                                state
                                    .with(|s| s.field(name))
                                    .into_iter()
                                    .map(|e| view! { <div class="form__error">{e}</div> })
                                    .collect_view()
                            }}
                        </div>
                    }
                })
                .collect_view()}
            <Flex gap=FlexGap::Small attr:class="api-form__buttons">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Medium
                    disabled=Signal::derive(move || loading.get() || state.with(|s| s.submitting))
                    on_click=submit
                >
                    {move || if state.with(|s| s.submitting) { "Saving..." } else { submit_text }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Medium
                    disabled=Signal::derive(move || state.with(|s| s.submitting))
                    on_click=move |_| handle.close()
                >
                    "Cancel"
                </Button>
            </Flex>
        </div>
    }
}

#[component]
fn FieldEditor(field: ApiFormField, input: FieldInput) -> impl IntoView {
    match (field.kind, input) {
        (_, FieldInput::Flag(checked)) => view! { <Checkbox checked=checked /> }.into_any(),
        (FormFieldKind::String, FieldInput::Text(value)) => {
            view! { <Input value=value /> }.into_any()
        }
        (FormFieldKind::Text, FieldInput::Text(value)) => {
            view! { <Textarea value=value attr:rows=3 /> }.into_any()
        }
        (FormFieldKind::Icon, FieldInput::Text(value)) => view! {
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <span class="form__icon-preview">{move || icon(&value.get())}</span>
                <Input value=value placeholder="ti:box:outline" />
            </Flex>
        }
        .into_any(),
        (FormFieldKind::Choice(choices), FieldInput::Text(value)) => view! {
            <Select value=value>
                {(!field.required).then(|| view! { <option value="">"---------"</option> })}
                {choices
                    .into_iter()
                    .map(|c| view! { <option value=choice_key(&c.value)>{c.display_name}</option> })
                    .collect_view()}
            </Select>
        }
        .into_any(),
        (FormFieldKind::Related { endpoint, filters, display_field }, FieldInput::Text(value)) => {
            view! {
                <RelatedSelect
                    endpoint=endpoint
                    filters=filters
                    display_field=display_field
                    value=value
                />
            }
            .into_any()
        }
        (FormFieldKind::Boolean, FieldInput::Text(value)) => {
            view! { <Input value=value /> }.into_any()
        }
    }
}

/// Select over the records of a list endpoint, valued by pk
#[component]
pub fn RelatedSelect(
    endpoint: ApiEndpoint,
    filters: Vec<(&'static str, String)>,
    display_field: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    let api = use_api();
    let options = RwSignal::new(Vec::<(i64, String)>::new());
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        let url = endpoint.url(None);
        match api.get::<ListResponse<Value>>(&url, &filters).await {
            Ok(list) => {
                let rows = list
                    .into_items()
                    .into_iter()
                    .filter_map(|record| {
                        let pk = record.get("pk")?.as_i64()?;
                        let label = record
                            .get(display_field)
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| format!("#{}", pk));
                        Some((pk, label))
                    })
                    .collect();
                let _ = options.try_set(rows);
            }
            Err(e) => {
                log::error!("failed to load options from {}: {}", url, e);
                let _ = error.try_set(Some(e.to_string()));
            }
        }
    });

    view! {
        <Select value=value>
            <option value="">"---------"</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|(pk, label)| view! { <option value=pk.to_string()>{label}</option> })
                    .collect_view()
            }}
        </Select>
        {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
    }
}
