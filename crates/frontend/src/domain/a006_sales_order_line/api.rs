use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a006_sales_order_line::SalesOrderLine;
use contracts::domain::common::RecordId;
use contracts::shared::api::{ApiError, ApiOp};

pub const SAVE_FALLBACK: &str = "Error saving record";
pub const DELETE_FALLBACK: &str = "Error deleting item";

/// Lines of one order, in server order
pub async fn fetch_lines(api: &ApiClient, so_id: RecordId) -> Result<Vec<SalesOrderLine>, ApiError> {
    if so_id.is_new() {
        return Ok(Vec::new());
    }
    api.fetch_rows(ApiRequest::new(ApiOp::SelectDetails).param("SOID", so_id))
        .await
}

/// Creates (id 0) or updates one line of order `so_id`.
/// Only the payload is checked here; the duplicate check needs the siblings
/// and happens before the editor commits.
pub async fn save_line(api: &ApiClient, line: &SalesOrderLine, so_id: RecordId) -> Result<(), ApiError> {
    let payload = line
        .to_payload(so_id)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let request = ApiRequest::new(ApiOp::SaveDetail).json(&[payload])?;
    api.send_write(request, SAVE_FALLBACK).await.map(|_| ())
}

pub async fn delete_line(api: &ApiClient, line_id: RecordId) -> Result<(), ApiError> {
    api.send_write(
        ApiRequest::new(ApiOp::DeleteDetail).param("SODetailID", line_id),
        DELETE_FALLBACK,
    )
    .await
    .map(|_| ())
}
