use super::model::{delete_location_fields, location_form_fields, location_query};
use super::tabs::LocationDetailsTab;
use super::view_model::{location_action_memo, scan_location_callback, scan_stock_item_callback};
use crate::domain::a001_stock_location::ui::list::StockLocationTable;
use crate::domain::a002_stock_item::ui::list::StockItemTable;
use crate::domain::a003_part::ui::list::PartListTable;
use crate::shared::actions::{
    delete_item_action, edit_item_action, ActionDropdown, ActionItem, AdminButton,
    OptionsActionDropdown,
};
use crate::shared::api::use_api;
use crate::shared::barcodes::{use_barcode_scan_dialog, BarcodeActionDropdown, ScanDialogProps};
use crate::shared::config::AppConfig;
use crate::shared::forms::{use_delete_api_form_modal, use_edit_api_form_modal, ApiFormProps};
use crate::shared::instance::use_instance;
use crate::shared::nav::{InstanceDetail, NavigationTree, PageDetail};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::panels::{PanelGroup, PanelType};
use crate::shared::printing::PrintingActions;
use crate::system::user_state::use_user_state;
use crate::usecases::u102_stock_adjustment::{
    use_count_stock_item, use_transfer_stock_item, StockOperationProps,
};
use contracts::domain::a001_stock_location::aggregate::{
    location_breadcrumbs, StockLocation, STOCK_INDEX_URL,
};
use contracts::domain::a002_stock_item::aggregate::StockItemFilters;
use contracts::domain::common::{ApiEndpoint, ModelType};
use contracts::system::roles::UserRole;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use leptos_router::NavigateOptions;
use serde_json::Value;

fn parse_location(value: &Value) -> Option<StockLocation> {
    match serde_json::from_value(value.clone()) {
        Ok(location) => Some(location),
        Err(e) => {
            log::error!("malformed stock location: {}", e);
            None
        }
    }
}

/// `/stock/location/:id`, and `/stock` for the top level without an id
#[component]
pub fn LocationDetail() -> impl IntoView {
    let params = use_params_map();
    let pk = Signal::derive(move || {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    let api = use_api();
    let user = use_user_state();
    let navigate = use_navigate();
    let default_panel = use_context::<AppConfig>()
        .map(|config| config.ui.default_panel)
        .unwrap_or_else(|| "details".to_string());

    let query = use_instance::<Value>(ApiEndpoint::StockLocationList, pk, location_query());
    let instance = Signal::derive(move || query.value().unwrap_or(Value::Null));
    let location = Memo::new(move |_| query.state.with(|s| s.value().and_then(parse_location)));
    let breadcrumbs = Memo::new(move |_| {
        location.with(|l| match l {
            Some(location) => location.breadcrumbs(),
            None => location_breadcrumbs(&[]),
        })
    });
    let plan = location_action_memo(pk, Signal::derive(move || user.roles()));

    let edit = use_edit_api_form_modal(ApiFormProps {
        endpoint: ApiEndpoint::StockLocationList,
        pk,
        title: "Edit Stock Location".to_string(),
        fields: location_form_fields(),
        on_form_success: {
            let refresh = query.refresh_callback();
            Callback::new(move |_: Value| refresh.run(()))
        },
        preamble: None,
    });
    let delete = use_delete_api_form_modal(ApiFormProps {
        endpoint: ApiEndpoint::StockLocationList,
        pk,
        title: "Delete Stock Location".to_string(),
        fields: delete_location_fields(),
        on_form_success: Callback::new(move |_: Value| {
            let target = location
                .with_untracked(|l| l.as_ref().map(StockLocation::url_after_delete))
                .unwrap_or_else(|| STOCK_INDEX_URL.to_string());
            log::debug!("stock location deleted, navigating to {}", target);
            navigate(&target, NavigateOptions::default());
        }),
        preamble: Some("Are you sure you want to delete this stock location?".to_string()),
    });

    let stock_props = StockOperationProps {
        pk,
        model: ModelType::StockLocation,
        refresh: query.refresh_callback(),
        filters: StockItemFilters::in_location(None),
    };
    let count = use_count_stock_item(stock_props.clone());
    let transfer = use_transfer_stock_item(stock_props);

    let scan_items = use_barcode_scan_dialog(ScanDialogProps {
        title: "Scan Stock Item".to_string(),
        model_type: ModelType::StockItem,
        callback: scan_stock_item_callback(api.clone(), pk, query.stale),
    });
    let scan_locations = use_barcode_scan_dialog(ScanDialogProps {
        title: "Scan Stock Location".to_string(),
        model_type: ModelType::StockLocation,
        callback: scan_location_callback(api, pk, query.stale),
    });

    let actions = move || {
        let plan = plan.get();
        let barcode = location.get().filter(|_| plan.show_barcode).map(|loc| {
            let scan_actions = vec![
                ActionItem::new("Scan in stock items", "stock", scan_items.callback())
                    .tooltip("Scan item into this location")
                    .hidden(plan.hide_scan),
                ActionItem::new("Scan in container", "location", scan_locations.callback())
                    .tooltip("Scan container into this location")
                    .hidden(plan.hide_scan),
            ];
            view! {
                <BarcodeActionDropdown
                    model=ModelType::StockLocation
                    pk=loc.pk.0
                    linked=loc.has_barcode()
                    perm=plan.barcode_perm
                    actions=scan_actions
                    on_change=query.refresh_callback()
                />
            }
        });
        let stock_actions = vec![
            ActionItem::new("Count Stock", "count", count.callback())
                .tooltip("Count stock items")
                .hidden(plan.hide_stock_actions),
            ActionItem::new("Transfer Stock", "transfer", transfer.callback())
                .tooltip("Transfer stock items")
                .hidden(plan.hide_stock_actions),
        ];
        let options = vec![
            edit_item_action(plan.hide_edit, "Edit Stock Location", edit.callback()),
            delete_item_action(plan.hide_delete, "Delete Stock Location", delete.callback()),
        ];

        view! {
            <AdminButton model=ModelType::StockLocation pk=pk />
            {barcode}
            <PrintingActions
                model_type=ModelType::StockLocation
                items=Signal::derive(move || pk.get().into_iter().collect::<Vec<_>>())
                hidden=plan.hide_print
                enable_labels=true
                enable_reports=true
            />
            <ActionDropdown tooltip="Stock Actions" icon_name="stock" actions=stock_actions />
            <OptionsActionDropdown tooltip="Location Actions" actions=options />
        }
    };

    let panels = Signal::derive(move || {
        let has_pk = pk.get().is_some();
        vec![
            PanelType::new("details", "Location Details", "info", move || {
                view! { <LocationDetailsTab pk=pk item=instance /> }
            }),
            PanelType::new("sublocations", "Stock Locations", "sitemap", move || {
                view! { <StockLocationTable parent=pk /> }
            }),
            PanelType::new("stock-items", "Stock Items", "packages", move || {
                view! { <StockItemTable location=pk /> }
            }),
            PanelType::new("default_parts", "Default Parts", "part", move || {
                view! { <PartListTable default_location=pk /> }
            })
            .hidden(!has_pk),
        ]
    });

    let tree_open = RwSignal::new(false);
    let title = Signal::derive(move || {
        location
            .with(|l| l.as_ref().map(|l| l.name.clone()))
            .unwrap_or_else(|| "Stock Location".to_string())
    });
    let subtitle = Signal::derive(move || location.with(|l| l.as_ref().map(|l| l.description.clone())));
    let icon_name = Signal::derive(move || {
        location
            .with(|l| l.as_ref().and_then(|l| l.display_icon().map(str::to_string)))
            .or_else(|| Some("location".to_string()))
    });

    view! {
        <PageFrame page_id="a001_stock_location--detail" category=PAGE_CAT_DETAIL>
            <NavigationTree title="Stock Locations" opened=tree_open selected=pk />
            <PageDetail
                title=title
                subtitle=subtitle
                icon_name=icon_name
                breadcrumbs=breadcrumbs
                on_breadcrumb_action=Callback::new(move |_: ()| tree_open.set(true))
                edit_action=edit.callback()
                edit_enabled=Signal::derive(move || plan.get().edit_enabled)
                stale=Signal::derive(move || query.stale.get())
                on_refresh=query.refresh_callback()
                actions=actions
            />
            <div class="page__content">
                <InstanceDetail query=query pk=pk required_role=UserRole::StockLocation>
                    <PanelGroup
                        page_key="stocklocation"
                        panels=panels
                        default_panel=default_panel.clone()
                    />
                </InstanceDetail>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_location_from_detail_response() {
        let value = json!({
            "pk": 7, "name": "Shelf", "parent": 3,
            "path": [{"pk": 3, "name": "Warehouse"}, {"pk": 7, "name": "Shelf"}]
        });
        let location = parse_location(&value).unwrap();
        assert_eq!(location.url_after_delete(), "/stock/location/3/");
        assert_eq!(location.breadcrumbs().len(), 3);

        assert!(parse_location(&json!({"name": "no pk"})).is_none());
    }
}
