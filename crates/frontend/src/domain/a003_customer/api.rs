use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a003_customer::Customer;
use contracts::domain::common::RecordId;
use contracts::shared::api::{ApiError, ApiOp};

/// Customers that trade with a division
pub async fn fetch_customers(
    api: &ApiClient,
    division_id: Option<RecordId>,
) -> Result<Vec<Customer>, ApiError> {
    let Some(division_id) = division_id.and_then(RecordId::non_zero) else {
        return Ok(Vec::new());
    };
    api.fetch_rows(ApiRequest::new(ApiOp::FetchCustomers).param("DivID", division_id))
        .await
}
