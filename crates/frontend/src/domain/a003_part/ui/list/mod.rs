use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_query::use_list_query;
use crate::shared::list_utils::{contains_ci, SearchInput, Searchable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_stock_item::aggregate::format_quantity;
use contracts::domain::a003_part::aggregate::Part;
use contracts::domain::common::ApiEndpoint;
use leptos::prelude::*;
use serde::Serialize;
use thaw::*;

impl Searchable for Part {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.description, filter)
            || self.ipn.as_deref().map(|ipn| contains_ci(ipn, filter)).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct PartFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    default_location: Option<i64>,
}

/// Parts whose default location is `default_location`
#[component]
pub fn PartListTable(#[prop(into)] default_location: Signal<Option<i64>>) -> impl IntoView {
    let filters = Signal::derive(move || PartFilters {
        default_location: default_location.get(),
    });
    let list = use_list_query::<Part, _>(ApiEndpoint::PartList, filters);

    view! {
        <PageFrame page_id="a003_part--list" category=PAGE_CAT_LIST class="embedded-table">
            <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="embedded-table__toolbar">
                <SearchInput
                    placeholder="Search parts"
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
                        <TableHeaderCell>"Description"</TableHeaderCell>
                        <TableHeaderCell>"In Stock"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || list.visible_rows().into_iter().map(|part| {
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>{part.name}</TableCellLayout>
                                </TableCell>
                                <TableCell>{part.ipn.unwrap_or_default()}</TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{part.description}</TableCellLayout>
                                </TableCell>
                                <TableCell>{format_quantity(part.in_stock)}</TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <Show when=move || !list.loading.get() && list.error.with(|e| e.is_none()) && list.filtered().is_empty()>
                <div class="embedded-table__empty">"No parts found"</div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::filter_list;

    #[test]
    fn test_search_by_ipn() {
        let parts: Vec<Part> = serde_json::from_value(serde_json::json!([
            {"pk": 1, "name": "M3 Screw", "IPN": "HW-003", "in_stock": 120.0},
            {"pk": 2, "name": "Washer", "description": "M3 washer"}
        ]))
        .unwrap();
        assert_eq!(filter_list(parts.clone(), "hw-").len(), 1);
        assert_eq!(filter_list(parts, "m3").len(), 2);
    }
}
