use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_query::use_list_query;
use crate::shared::list_utils::{contains_ci, SearchInput, Searchable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_stock_item::aggregate::{StockItem, StockItemFilters};
use contracts::domain::common::ApiEndpoint;
use leptos::prelude::*;
use thaw::*;

impl Searchable for StockItem {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.part_name(), filter)
            || self.part_ipn().map(|ipn| contains_ci(ipn, filter)).unwrap_or(false)
            || self.serial.as_deref().map(|s| contains_ci(s, filter)).unwrap_or(false)
            || self.batch.as_deref().map(|b| contains_ci(b, filter)).unwrap_or(false)
    }
}

#[component]
pub fn StockItemTable(#[prop(into)] location: Signal<Option<i64>>) -> impl IntoView {
    let filters = Signal::derive(move || StockItemFilters::in_location(location.get()));
    let list = use_list_query::<StockItem, _>(ApiEndpoint::StockItemList, filters);

    view! {
        <PageFrame page_id="a002_stock_item--list" category=PAGE_CAT_LIST class="embedded-table">
            <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="embedded-table__toolbar">
                <SearchInput
                    placeholder="Search stock"
                    on_change=Callback::new(move |text: String| list.set_search(text))
                />
                <PaginationControls
                    current_page=list.page
                    total_pages=Signal::derive(move || list.total_pages())
                    total_count=Signal::derive(move || list.filtered().len())
                    on_page_change=Callback::new(move |page: usize| list.page.set(page))
                />
            </Flex>
            {move || list.error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}
            <Show when=move || list.loading.get()>
                <Spinner />
            </Show>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Part"</TableHeaderCell>
                        <TableHeaderCell>"IPN"</TableHeaderCell>
                        <TableHeaderCell>"Stock"</TableHeaderCell>
                        <TableHeaderCell>"Batch"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                        <TableHeaderCell>"Last Updated"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || list.visible_rows().into_iter().map(|item| {
                        let ipn = item.part_ipn().unwrap_or_default().to_string();
                        let updated = item
                            .updated
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_default();
                        let part_name = item.part_name();
                        let quantity = item.quantity_display();
                        let batch = item.batch.clone().unwrap_or_default();
                        let status = item.status_text.clone().unwrap_or_default();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>{part_name}</TableCellLayout>
                                </TableCell>
                                <TableCell>{ipn}</TableCell>
                                <TableCell>{quantity}</TableCell>
                                <TableCell>{batch}</TableCell>
                                <TableCell>{status}</TableCell>
                                <TableCell>{updated}</TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <Show when=move || !list.loading.get() && list.error.with(|e| e.is_none()) && list.filtered().is_empty()>
                <div class="embedded-table__empty">"No stock items found"</div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::filter_list;

    #[test]
    fn test_location_filters_query() {
        assert_eq!(
            serde_qs::to_string(&StockItemFilters::in_location(Some(3))).unwrap(),
            "location=3&in_stock=true&cascade=false&part_detail=true"
        );
    }

    #[test]
    fn test_search_by_serial_and_ipn() {
        let items: Vec<StockItem> = serde_json::from_value(serde_json::json!([
            {"pk": 1, "part": 2, "quantity": 1, "serial": "1042",
             "part_detail": {"pk": 2, "name": "Widget", "IPN": "W-01"}},
            {"pk": 2, "part": 3, "quantity": 9, "batch": "B7",
             "part_detail": {"pk": 3, "name": "Resistor"}}
        ]))
        .unwrap();
        assert_eq!(filter_list(items.clone(), "1042").len(), 1);
        assert_eq!(filter_list(items.clone(), "w-01").len(), 1);
        assert_eq!(filter_list(items.clone(), "b7")[0].pk.0, 2);
        assert!(filter_list(items, "capacitor").is_empty());
    }
}
