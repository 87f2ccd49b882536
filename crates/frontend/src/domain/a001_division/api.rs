use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a001_division::Division;
use contracts::shared::api::{ApiError, ApiOp};

/// All sales divisions, root of the header cascade
pub async fn fetch_divisions(api: &ApiClient) -> Result<Vec<Division>, ApiError> {
    api.fetch_rows(ApiRequest::new(ApiOp::FetchDivisions)).await
}
