use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::details::YesNoBadge;
use crate::shared::icons::icon;
use crate::shared::list_query::use_list_query;
use crate::shared::list_utils::{contains_ci, SearchInput, Searchable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_stock_location::aggregate::StockLocation;
use contracts::domain::common::ApiEndpoint;
use leptos::prelude::*;
use leptos_router::components::A;
use serde::Serialize;
use thaw::*;

impl Searchable for StockLocation {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.description, filter)
            || contains_ci(&self.pathstring, filter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SublocationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<i64>,
}

/// Locations directly below `parent`; every location when `parent` is absent
#[component]
pub fn StockLocationTable(#[prop(into)] parent: Signal<Option<i64>>) -> impl IntoView {
    let filters = Signal::derive(move || SublocationFilters { parent: parent.get() });
    let list = use_list_query::<StockLocation, _>(ApiEndpoint::StockLocationList, filters);

    view! {
        <PageFrame page_id="a001_stock_location--list" category=PAGE_CAT_LIST class="embedded-table">
            <Flex gap=FlexGap::Small align=FlexAlign::Center attr:class="embedded-table__toolbar">
                <SearchInput
                    placeholder="Search locations"
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
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Description"</TableHeaderCell>
                        <TableHeaderCell>"Path"</TableHeaderCell>
                        <TableHeaderCell>"Stock Items"</TableHeaderCell>
                        <TableHeaderCell>"Structural"</TableHeaderCell>
                        <TableHeaderCell>"External"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || list.visible_rows().into_iter().map(|location| {
                        let url = location.detail_url();
                        let row_icon = location.display_icon().unwrap_or("location").to_string();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout truncate=true>
                                        {icon(&row_icon)}
                                        " "
                                        <A href=url>{location.name}</A>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{location.description}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{location.pathstring}</TableCellLayout>
                                </TableCell>
                                <TableCell>{location.items}</TableCell>
                                <TableCell><YesNoBadge value=location.structural /></TableCell>
                                <TableCell><YesNoBadge value=location.external /></TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
            <Show when=move || !list.loading.get() && list.error.with(|e| e.is_none()) && list.filtered().is_empty()>
                <div class="embedded-table__empty">"No stock locations found"</div>
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::filter_list;

    #[test]
    fn test_search_matches_path_and_description() {
        let locations: Vec<StockLocation> = serde_json::from_value(serde_json::json!([
            {"pk": 1, "name": "Shelf A", "description": "Small parts", "pathstring": "Warehouse/Shelf A"},
            {"pk": 2, "name": "Bin 3", "description": "", "pathstring": "Annex/Bin 3"}
        ]))
        .unwrap();

        let by_path = filter_list(locations.clone(), "warehouse");
        assert_eq!(by_path.len(), 1);
        assert_eq!(by_path[0].name, "Shelf A");

        assert_eq!(filter_list(locations.clone(), "SMALL").len(), 1);
        assert_eq!(filter_list(locations, "").len(), 2);
    }

    #[test]
    fn test_filters_omit_missing_parent() {
        assert_eq!(
            serde_qs::to_string(&SublocationFilters { parent: Some(4) }).unwrap(),
            "parent=4"
        );
        assert_eq!(serde_qs::to_string(&SublocationFilters { parent: None }).unwrap(), "");
    }
}
