//! Item hierarchy lookups. A missing parent short-circuits to an empty list.

use crate::shared::api_utils::{ApiClient, ApiRequest};
use contracts::domain::a004_item_catalog::{Item, MainGroup, SubMainGroup, Unit};
use contracts::domain::common::RecordId;
use contracts::shared::api::{ApiError, ApiOp};

pub async fn fetch_main_groups(api: &ApiClient) -> Result<Vec<MainGroup>, ApiError> {
    api.fetch_rows(ApiRequest::new(ApiOp::FetchMainGroups)).await
}

pub async fn fetch_sub_main_groups(
    api: &ApiClient,
    main_group_id: Option<RecordId>,
) -> Result<Vec<SubMainGroup>, ApiError> {
    let Some(main_group_id) = main_group_id.and_then(RecordId::non_zero) else {
        return Ok(Vec::new());
    };
    api.fetch_rows(ApiRequest::new(ApiOp::FetchSubMainGroups).param("MainGroupID", main_group_id))
        .await
}

/// Items of a sub main group. The server spells the second key `SubMianGroupID`.
pub async fn fetch_items(
    api: &ApiClient,
    main_group_id: Option<RecordId>,
    sub_main_group_id: Option<RecordId>,
) -> Result<Vec<Item>, ApiError> {
    let (Some(main_group_id), Some(sub_main_group_id)) = (
        main_group_id.and_then(RecordId::non_zero),
        sub_main_group_id.and_then(RecordId::non_zero),
    ) else {
        return Ok(Vec::new());
    };
    api.fetch_rows(
        ApiRequest::new(ApiOp::FetchItems)
            .param("MainGroupID", main_group_id)
            .param("SubMianGroupID", sub_main_group_id),
    )
    .await
}

pub async fn fetch_units(api: &ApiClient, item_id: Option<RecordId>) -> Result<Vec<Unit>, ApiError> {
    let Some(item_id) = item_id.and_then(RecordId::non_zero) else {
        return Ok(Vec::new());
    };
    api.fetch_rows(ApiRequest::new(ApiOp::FetchUnits).param("ItemID", item_id))
        .await
}
