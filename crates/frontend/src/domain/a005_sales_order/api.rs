use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a005_sales_order::{
    MasterSaved, SalesOrderHeader, SalesOrderMaster, SessionIds,
};
use contracts::domain::common::RecordId;
use contracts::shared::api::{ApiError, ApiOp};

pub const SAVE_FALLBACK: &str = "Error saving sales order";
pub const DELETE_FALLBACK: &str = "Error deleting sales order";

pub async fn fetch_masters(api: &ApiClient) -> Result<Vec<SalesOrderMaster>, ApiError> {
    api.fetch_rows(ApiRequest::new(ApiOp::ListMasters)).await
}

/// `None` when the server knows no order with this id
pub async fn fetch_master(
    api: &ApiClient,
    id: RecordId,
) -> Result<Option<SalesOrderMaster>, ApiError> {
    let rows: Vec<SalesOrderMaster> = api
        .fetch_rows(ApiRequest::new(ApiOp::SelectMaster).param("IDNumber", id))
        .await?;
    Ok(rows.into_iter().next())
}

/// Creates (id 0) or updates the header. Validation runs before anything is sent.
pub async fn save_master(
    api: &ApiClient,
    header: &SalesOrderHeader,
    session: SessionIds,
) -> Result<MasterSaved, ApiError> {
    let payload = header
        .to_payload(session)
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let request = ApiRequest::new(ApiOp::SaveMaster).json(&[payload])?;
    let reply = api.send_write(request, SAVE_FALLBACK).await?;
    Ok(MasterSaved::from_reply(&reply, header.id))
}

pub async fn delete_master(api: &ApiClient, id: RecordId) -> Result<(), ApiError> {
    api.send_write(
        ApiRequest::new(ApiOp::DeleteMaster).param("IDNumber", id),
        DELETE_FALLBACK,
    )
    .await
    .map(|_| ())
}
