use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a002_so_type::SoType;
use contracts::domain::common::RecordId;
use contracts::shared::api::{ApiError, ApiOp};

/// SO types of a division; no division means no types
pub async fn fetch_so_types(
    api: &ApiClient,
    division_id: Option<RecordId>,
) -> Result<Vec<SoType>, ApiError> {
    let Some(division_id) = division_id.and_then(RecordId::non_zero) else {
        return Ok(Vec::new());
    };
    api.fetch_rows(ApiRequest::new(ApiOp::FetchSoTypes).param("DivID", division_id))
        .await
}
