use super::api;
use super::state::{build_request, AdjustmentRow, StockOperation};
use crate::shared::api::use_api;
use crate::shared::forms::RelatedSelect;
use crate::shared::modal_frame::ModalSize;
use crate::shared::modal_stack::{use_modal_stack, CloseGuard, ModalHandle};
use contracts::domain::a002_stock_item::aggregate::StockItemFilters;
use contracts::domain::common::{ApiEndpoint, ModelType};
use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone)]
pub struct StockOperationProps {
    pub pk: Signal<Option<i64>>,
    /// Kind of record `pk` refers to
    pub model: ModelType,
    /// Runs after a successful submit
    pub refresh: Callback<()>,
    pub filters: StockItemFilters,
}

/// `base` with the record's pk applied to the matching filter
pub fn operation_filters(
    model: ModelType,
    base: &StockItemFilters,
    pk: Option<i64>,
) -> StockItemFilters {
    let mut filters = base.clone();
    if model == ModelType::StockLocation {
        filters.location = pk;
    }
    filters
}

#[derive(Clone, Copy)]
pub struct StockOperationModal {
    open: Callback<()>,
}

impl StockOperationModal {
    pub fn open(&self) {
        self.open.run(());
    }

    pub fn callback(&self) -> Callback<()> {
        self.open
    }
}

pub fn use_count_stock_item(props: StockOperationProps) -> StockOperationModal {
    use_stock_operation(props, StockOperation::Count)
}

pub fn use_transfer_stock_item(props: StockOperationProps) -> StockOperationModal {
    use_stock_operation(props, StockOperation::Transfer)
}

fn use_stock_operation(props: StockOperationProps, operation: StockOperation) -> StockOperationModal {
    let modal = use_modal_stack();
    let props = StoredValue::new(props);

    let open = Callback::new(move |_: ()| {
        let props = props.get_value();
        let source = props.pk.get_untracked();
        let filters = operation_filters(props.model, &props.filters, source);
        let refresh = props.refresh;

        let busy = Arc::new(AtomicBool::new(false));
        let guard: CloseGuard = {
            let busy = busy.clone();
            Arc::new(move || !busy.load(Ordering::SeqCst))
        };

        modal.push_guarded(operation.title(), ModalSize::Large, Some(guard), move |handle| {
            view! {
                <StockOperationView
                    operation=operation
                    filters=filters.clone()
                    source=source
                    refresh=refresh
                    handle=handle
                    busy=busy.clone()
                />
            }
            .into_any()
        });
    });

    StockOperationModal { open }
}

#[component]
fn StockOperationView(
    operation: StockOperation,
    filters: StockItemFilters,
    /// Location the items are taken from, excluded as a destination
    source: Option<i64>,
    refresh: Callback<()>,
    handle: ModalHandle,
    busy: Arc<AtomicBool>,
) -> impl IntoView {
    let api = use_api();
    let rows = RwSignal::new(Vec::<AdjustmentRow>::new());
    let loading = RwSignal::new(true);
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let destination = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    {
        let api = api.clone();
        spawn_local(async move {
            match api::fetch_items(&api, &filters).await {
                Ok(items) => {
                    let _ = rows.try_set(items.into_iter().map(AdjustmentRow::new).collect());
                }
                Err(e) => {
                    log::error!("failed to load stock items: {}", e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    }

    let submit = move |_: leptos::ev::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        let target = destination.get_untracked().trim().parse::<i64>().ok();
        if operation == StockOperation::Transfer && target.is_some() && target == source {
            error.set(Some("Items are already in this location".to_string()));
            return;
        }
        let request = match rows.with_untracked(|rows| {
            build_request(operation, rows, target, &notes.get_untracked())
        }) {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        error.set(None);
        submitting.set(true);
        busy.store(true, Ordering::SeqCst);
        let api = api.clone();
        let busy = busy.clone();
        spawn_local(async move {
            let result = api::submit(&api, operation, &request).await;
            busy.store(false, Ordering::SeqCst);
            let _ = submitting.try_set(false);
            match result {
                Ok(()) => {
                    log::info!("{} submitted", operation.title());
                    handle.close();
                    refresh.run(());
                }
                Err(e) => {
                    log::error!("{} failed: {}", operation.title(), e);
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let set_quantity = move |index: usize, value: String| {
        rows.update(|rows| {
            if let Some(row) = rows.get_mut(index) {
                row.quantity = value;
            }
        });
    };
    let toggle_row = move |index: usize| {
        rows.update(|rows| {
            if let Some(row) = rows.get_mut(index) {
                row.selected = !row.selected;
            }
        });
    };

    let quantity_header = match operation {
        StockOperation::Count => "Counted",
        StockOperation::Transfer => "Move",
    };

    view! {
        <div class="stock-operation">
            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}
            <Show when=move || loading.get()>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Spinner />
                    <span>"Loading stock items..."</span>
                </Flex>
            </Show>
            <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                <MessageBar intent=MessageBarIntent::Info>"No stock items in this location"</MessageBar>
            </Show>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>""</TableHeaderCell>
                        <TableHeaderCell>"Part"</TableHeaderCell>
                        <TableHeaderCell>"In Stock"</TableHeaderCell>
                        <TableHeaderCell>{quantity_header}</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .enumerate()
                            .map(|(index, row)| {
                                let part_name = row.item.part_name();
                                let quantity_display = row.item.quantity_display();
                                let quantity_disabled = !row.selected || row.item.is_serialized();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <input
                                                type="checkbox"
                                                prop:checked=row.selected
                                                on:change=move |_| toggle_row(index)
                                            />
                                        </TableCell>
                                        <TableCell>{part_name}</TableCell>
                                        <TableCell>{quantity_display}</TableCell>
                                        <TableCell>
                                            <input
                                                type="number"
                                                min="0"
                                                step="any"
                                                class="stock-operation__quantity"
                                                prop:value=row.quantity.clone()
                                                disabled=quantity_disabled
                                                on:change=move |ev| set_quantity(index, event_target_value(&ev))
                                            />
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                    }}
                </TableBody>
            </Table>
            {(operation == StockOperation::Transfer).then(|| view! {
                <div class="form__group">
                    <label class="form__label">"Destination" " *"</label>
                    <RelatedSelect
                        endpoint=ApiEndpoint::StockLocationList
                        filters=vec![("structural", "false".to_string())]
                        display_field="pathstring"
                        value=destination
                    />
                </div>
            })}
            <div class="form__group">
                <label class="form__label">"Notes"</label>
                <Input value=notes placeholder="Add transaction note (optional)" />
            </div>
            <Flex gap=FlexGap::Small attr:class="api-form__buttons">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Medium
                    disabled=Signal::derive(move || loading.get() || submitting.get())
                    on_click=submit
                >
                    {move || if submitting.get() { "Saving..." } else { "Submit" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Medium
                    disabled=Signal::derive(move || submitting.get())
                    on_click=move |_| handle.close()
                >
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
    fn test_location_pk_becomes_item_filter() {
        let base = StockItemFilters::in_location(None);

        let filters = operation_filters(ModelType::StockLocation, &base, Some(4));
        assert_eq!(filters.location, Some(4));
        assert_eq!(filters.in_stock, Some(true));

        let filters = operation_filters(ModelType::Part, &base, Some(4));
        assert_eq!(filters.location, None);
    }
}
