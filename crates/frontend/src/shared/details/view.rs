use super::field::DetailValue;
use super::schema::{lookup, row_key, DetailRow, DetailsSchema};
use crate::shared::api::use_api;
use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::icons::icon;
use contracts::domain::common::{ApiEndpoint, ModelType};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use serde_json::Value;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// One card of label / value rows
#[component]
pub fn DetailsTable(
    #[prop(optional, into)] title: Option<String>,
    schema: DetailsSchema,
    #[prop(into)] item: Signal<Value>,
) -> impl IntoView {
    let rows = Memo::new(move |_| item.with(|item| schema.rows(item)));

    view! {
        <Card attr:class="details-table">
            {title.map(|t| view! { <h4 class="details-section__title">{t}</h4> })}
            <table class="details-table__rows">
                <tbody>
                    <For
                        each=move || rows.get()
                        key=row_key
                        children=|row| view! { <DetailRowView row=row /> }
                    />
                </tbody>
            </table>
        </Card>
    }
}

/// Two-column layout for detail cards
#[component]
pub fn ItemDetailsGrid(children: Children) -> impl IntoView {
    view! {
        <div class="item-details-grid">{children()}</div>
    }
}

#[component]
fn DetailRowView(row: DetailRow) -> impl IntoView {
    let copy_text = row.value.copy_text().filter(|_| row.copy);

    view! {
        <tr class="details-table__row">
            <td class="details-table__icon">{row.icon.map(icon)}</td>
            <td class="details-table__label">{row.label}</td>
            <td class="details-table__value">
                {match row.value {
                    DetailValue::Text(text) => view! { <span>{text}</span> }.into_any(),
                    DetailValue::IconText { icon: name, text } => view! {
                        <span class="details-table__icon-text">{icon(&name)}" "{text}</span>
                    }
                    .into_any(),
                    DetailValue::Bool(flag) => view! { <YesNoBadge value=flag /> }.into_any(),
                    DetailValue::Link { model, pk, model_field, label } => {
                        view! { <LinkValue model=model pk=pk model_field=model_field label=label /> }
                            .into_any()
                    }
                    DetailValue::Empty => view! { <span class="details-table__empty">"-"</span> }.into_any(),
                }}
            </td>
            <td class="details-table__copy">
                {copy_text.map(|text| view! { <CopyButton text=text /> })}
            </td>
        </tr>
    }
}

#[component]
pub fn YesNoBadge(value: bool) -> impl IntoView {
    view! {
        <Badge
            appearance=BadgeAppearance::Tint
            color=if value { BadgeColor::Success } else { BadgeColor::Danger }
        >
            {if value { "Yes" } else { "No" }}
        </Badge>
    }
}

/// Linked record: shows its `model_field`, fetched when not embedded
#[component]
fn LinkValue(
    model: ModelType,
    pk: i64,
    model_field: &'static str,
    label: Option<String>,
) -> impl IntoView {
    let text = RwSignal::new(label.clone());
    let failed = RwSignal::new(false);

    if label.is_none() {
        let api = use_api();
        spawn_local(async move {
            let url = ApiEndpoint::for_model(model).url(Some(pk));
            match api.get::<Value>(&url, &[]).await {
                Ok(record) => {
                    let name = lookup(&record, model_field)
                        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));
                    let _ = text.try_set(name);
                }
                Err(e) => {
                    log::error!("failed to load linked {} #{}: {}", model.name(), pk, e);
                    let _ = failed.try_set(true);
                }
            }
        });
    }

    let shown = move || {
        text.get().unwrap_or_else(|| {
            if failed.get() {
                format!("{} #{}", model.label(), pk)
            } else {
                "…".to_string()
            }
        })
    };

    match model.detail_url(pk) {
        Some(href) => view! { <a class="details-table__link" href=href>{shown}</a> }.into_any(),
        None => view! { <span>{shown}</span> }.into_any(),
    }
}

#[component]
fn CopyButton(text: String) -> impl IntoView {
    let copied = RwSignal::new(false);

    let on_click = move |_| {
        copy_to_clipboard(&text, move |ok| {
            if ok {
                copied.set(true);
                spawn_local(async move {
                    TimeoutFuture::new(1500).await;
                    let _ = copied.try_set(false);
                });
            }
        });
    };

    view! {
        <button
            class="copy-button"
            title=move || if copied.get() { "Copied" } else { "Copy" }
            on:click=on_click
        >
            {icon("copy")}
        </button>
    }
}
