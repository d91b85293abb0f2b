use super::model::{reparent, scan_reparent_body, scan_transfer_request, transfer_into};
use crate::shared::api::{ApiClient, ApiError};
use crate::shared::barcodes::{ScanCallback, ScanFuture, ScanOutcome};
use contracts::domain::a001_stock_location::aggregate::{StockLocationDto, StockLocationId};
use contracts::domain::common::ModelType;
use contracts::system::roles::{UserRole, UserRoles};
use contracts::usecases::u101_barcode_scan::scan::ResolvedBarcode;
use contracts::usecases::u102_stock_adjustment::adjustment::StockTransferRequest;
use leptos::prelude::*;
use std::sync::Arc;

/// Which controls of the location header are shown.
///
/// Computed from the role grants alone so it can be checked without a
/// reactive runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationActionPlan {
    pub show_barcode: bool,
    /// Link / unlink a custom barcode
    pub barcode_perm: bool,
    pub hide_scan: bool,
    pub hide_print: bool,
    pub hide_stock_actions: bool,
    pub hide_edit: bool,
    pub hide_delete: bool,
    /// Pencil button in the title row
    pub edit_enabled: bool,
}

pub fn location_actions(has_pk: bool, roles: &UserRoles) -> LocationActionPlan {
    let can_change = roles.has_change_role(UserRole::StockLocation);
    LocationActionPlan {
        show_barcode: has_pk,
        barcode_perm: can_change,
        hide_scan: !can_change,
        hide_print: !has_pk,
        hide_stock_actions: !has_pk || !roles.has_change_role(UserRole::Stock),
        hide_edit: !has_pk || !can_change,
        hide_delete: !has_pk || !roles.has_delete_role(UserRole::StockLocation),
        edit_enabled: has_pk && roles.has_change_permission(ModelType::StockLocation),
    }
}

/// Action plan that follows the pk and the role grants as they load
pub fn location_action_memo(
    pk: Signal<Option<i64>>,
    roles: Signal<UserRoles>,
) -> Memo<LocationActionPlan> {
    Memo::new(move |_| roles.with(|roles| location_actions(pk.get().is_some(), roles)))
}

fn current_location(pk: Option<i64>) -> Result<StockLocationId, String> {
    pk.map(StockLocationId)
        .ok_or_else(|| "No stock location selected".to_string())
}

/// Transfer posted for a scanned stock item, checked before any request
pub fn item_scan_request(
    pk: Option<i64>,
    scanned: &ResolvedBarcode,
) -> Result<StockTransferRequest, String> {
    current_location(pk).and_then(|location| scan_transfer_request(location, scanned))
}

/// Reparent body sent for a scanned location, checked before any request
pub fn location_scan_body(
    pk: Option<i64>,
    scanned: &ResolvedBarcode,
) -> Result<StockLocationDto, String> {
    current_location(pk).and_then(|location| scan_reparent_body(location, scanned))
}

/// Message shown for a finished scan request and whether the page is now stale
pub fn scan_result(
    result: Result<(), ApiError>,
    success: &str,
    failure: &str,
) -> (ScanOutcome, bool) {
    match result {
        Ok(()) => (ScanOutcome::Success(success.to_string()), true),
        Err(e) => {
            log::error!("{}: {}", failure, e);
            (ScanOutcome::Error(failure.to_string()), false)
        }
    }
}

fn finish_scan(stale: RwSignal<bool>, (outcome, now_stale): (ScanOutcome, bool)) -> ScanOutcome {
    if now_stale {
        let _ = stale.try_set(true);
    }
    outcome
}

/// Moves the full quantity of a scanned stock item into the current location
pub fn scan_stock_item_callback(
    api: ApiClient,
    pk: Signal<Option<i64>>,
    stale: RwSignal<bool>,
) -> ScanCallback {
    Arc::new(move |code: String, scanned: ResolvedBarcode| -> ScanFuture {
        let api = api.clone();
        let request = item_scan_request(pk.try_get_untracked().flatten(), &scanned);
        Box::pin(async move {
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    log::error!("scan '{}' rejected: {}", code, e);
                    return ScanOutcome::Error(e);
                }
            };
            log::debug!("scanning stock item {} into location {}", scanned.pk, request.location.0);
            let result = transfer_into(&api, &request).await;
            finish_scan(
                stale,
                scan_result(result, "Scanned stock item into location", "Error scanning stock item"),
            )
        })
    })
}

/// Moves a scanned location below the current one
pub fn scan_location_callback(
    api: ApiClient,
    pk: Signal<Option<i64>>,
    stale: RwSignal<bool>,
) -> ScanCallback {
    Arc::new(move |code: String, scanned: ResolvedBarcode| -> ScanFuture {
        let api = api.clone();
        let body = location_scan_body(pk.try_get_untracked().flatten(), &scanned);
        Box::pin(async move {
            let body = match body {
                Ok(body) => body,
                Err(e) => {
                    log::error!("scan '{}' rejected: {}", code, e);
                    return ScanOutcome::Error(e);
                }
            };
            log::debug!("scanning stock location {} into parent", scanned.pk);
            let result = reparent(&api, scanned.pk, &body).await;
            finish_scan(
                stale,
                scan_result(
                    result,
                    "Scanned stock location into location",
                    "Error scanning stock location",
                ),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roles_of(value: serde_json::Value) -> UserRoles {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_pk_hides_edit_and_delete() {
        let admin = roles_of(json!({"is_superuser": true}));
        let plan = location_actions(false, &admin);
        assert!(plan.hide_edit);
        assert!(plan.hide_delete);
        assert!(plan.hide_print);
        assert!(plan.hide_stock_actions);
        assert!(!plan.show_barcode);
        assert!(!plan.edit_enabled);

        let plan = location_actions(true, &admin);
        assert!(!plan.hide_edit && !plan.hide_delete && !plan.hide_stock_actions);
        assert!(plan.edit_enabled && plan.show_barcode && plan.barcode_perm);
    }

    #[test]
    fn test_role_gating() {
        let viewer = roles_of(json!({
            "roles": {"stock_location": ["view", "change"], "stock": ["view"]},
            "permissions": {"stocklocation": ["view"]}
        }));
        let plan = location_actions(true, &viewer);
        assert!(!plan.hide_edit);
        assert!(plan.hide_delete);
        assert!(plan.hide_stock_actions);
        assert!(!plan.hide_scan);
        assert!(!plan.edit_enabled);

        let nobody = UserRoles::default();
        let plan = location_actions(true, &nobody);
        assert!(plan.hide_edit && plan.hide_delete && plan.hide_scan);
        assert!(!plan.barcode_perm);
        assert!(!plan.hide_print);
    }

    #[test]
    fn test_plan_follows_roles_once_loaded() {
        let owner = Owner::new();
        owner.with(|| {
            let roles = RwSignal::new(UserRoles::default());
            let pk = RwSignal::new(Some(7));
            let plan = location_action_memo(pk.into(), roles.into());
            assert!(plan.get_untracked().hide_edit);
            assert!(plan.get_untracked().hide_stock_actions);

            roles.set(roles_of(json!({
                "roles": {"stock_location": ["view", "change", "delete"], "stock": ["change"]}
            })));
            let loaded = plan.get_untracked();
            assert!(!loaded.hide_edit);
            assert!(!loaded.hide_delete);
            assert!(!loaded.hide_stock_actions);

            pk.set(None);
            assert!(plan.get_untracked().hide_edit);
        });
    }

    fn scanned(model: ModelType, pk: i64, instance: serde_json::Value) -> ResolvedBarcode {
        ResolvedBarcode {
            model,
            pk,
            instance,
            message: None,
        }
    }

    #[test]
    fn test_scan_result_marks_stale_only_on_success() {
        let (outcome, stale) = scan_result(Ok(()), "Scanned stock item into location", "Error scanning stock item");
        assert_eq!(outcome, ScanOutcome::Success("Scanned stock item into location".to_string()));
        assert!(stale);

        let (outcome, stale) = scan_result(
            Err(ApiError::Network("offline".to_string())),
            "Scanned stock item into location",
            "Error scanning stock item",
        );
        assert_eq!(outcome, ScanOutcome::Error("Error scanning stock item".to_string()));
        assert!(!stale);
    }

    #[test]
    fn test_scans_rejected_before_request() {
        let item = scanned(ModelType::StockItem, 31, json!({"quantity": 4.0}));
        assert!(item_scan_request(None, &item).is_err());
        assert_eq!(item_scan_request(Some(7), &item).unwrap().location, StockLocationId(7));

        let child = scanned(ModelType::StockLocation, 7, serde_json::Value::Null);
        assert_eq!(
            location_scan_body(Some(7), &child).unwrap_err(),
            "Cannot scan a location into itself"
        );
        assert!(location_scan_body(None, &child).is_err());
        assert!(location_scan_body(Some(3), &child).is_ok());
    }
}
