use super::state::{AdjustmentRequest, StockOperation};
use crate::shared::api::{ApiClient, ApiError};
use contracts::domain::a002_stock_item::aggregate::{StockItem, StockItemFilters};
use contracts::domain::common::ApiEndpoint;
use contracts::shared::list_response::ListResponse;
use serde_json::Value;

pub async fn fetch_items(
    api: &ApiClient,
    filters: &StockItemFilters,
) -> Result<Vec<StockItem>, ApiError> {
    let response: ListResponse<StockItem> = api
        .get_filtered(&ApiEndpoint::StockItemList.url(None), filters)
        .await?;
    Ok(response.into_items())
}

pub async fn submit(
    api: &ApiClient,
    operation: StockOperation,
    request: &AdjustmentRequest,
) -> Result<(), ApiError> {
    let _: Value = api.post(&operation.endpoint().url(None), request).await?;
    Ok(())
}
