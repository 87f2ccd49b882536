//! Transport to the sales API.
//!
//! Every operation is a GET against the configured endpoint. Reads carry
//! their parameters in the query string; writes additionally carry the
//! payload rows as a URL-encoded JSON array in `json`. All URL building
//! lives here.

use contracts::shared::api::{interpret_write_reply, parse_rows, ApiError, ApiOp, ApiReply};
use gloo_net::http::Request;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One call of an [`ApiOp`] with its query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    op: ApiOp,
    params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(op: ApiOp) -> Self {
        Self {
            op,
            params: Vec::new(),
        }
    }

    pub fn op(&self) -> ApiOp {
        self.op
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    /// Attaches `rows` as the `json` parameter
    pub fn json<T: Serialize>(self, rows: &[T]) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(rows)
            .map_err(|e| ApiError::Parse(format!("cannot encode payload: {}", e)))?;
        Ok(self.param("json", encoded))
    }

    /// Current epoch millis for reads; writes are never cached anyway
    pub fn cache_buster(&self) -> Option<i64> {
        (!self.op.is_write()).then(|| chrono::Utc::now().timestamp_millis())
    }

    /// Full URL; `cache_buster` appends `_ts` so browsers never serve a stale read
    pub fn to_url(&self, base_url: &str, cache_buster: Option<i64>) -> String {
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let mut url = format!("{}{}{}={}", base_url, separator, self.op.query_key(), self.op.name());
        for (key, value) in &self.params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        if let Some(ts) = cache_buster {
            url.push_str(&format!("&_ts={}", ts));
        }
        url
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn get_json(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = request.to_url(&self.base_url, request.cache_buster());
        log::debug!("GET {}", request.op().name());

        let response = Request::get(&url)
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Network(format!(
                "HTTP {} {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Read operation returning rows in server order
    pub async fn fetch_rows<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>, ApiError> {
        let body = self.get_json(&request).await?;
        parse_rows(body).inspect_err(|e| log::error!("{}: {}", request.op().name(), e))
    }

    /// Write operation under the `ErrCode` convention.
    /// `fallback` is shown when the server gives no message.
    pub async fn send_write(&self, request: ApiRequest, fallback: &str) -> Result<ApiReply, ApiError> {
        let body = self.get_json(&request).await?;
        interpret_write_reply(request.op(), &body, fallback)
            .inspect_err(|e| log::warn!("{} rejected: {}", request.op().name(), e))
    }
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_sales_order_line::SalesOrderLinePayload;

    const BASE: &str = "http://host/wsDataPool/WebAPI.aspx";

    #[test]
    fn test_read_url() {
        let request = ApiRequest::new(ApiOp::FetchItems)
            .param("MainGroupID", 1)
            .param("SubMianGroupID", 2);
        assert_eq!(
            request.to_url(BASE, None),
            "http://host/wsDataPool/WebAPI.aspx?op=Gen_Fetch_Item&MainGroupID=1&SubMianGroupID=2"
        );
        assert!(request.to_url(BASE, Some(99)).ends_with("&_ts=99"));
    }

    #[test]
    fn test_save_url_uses_upper_case_key_and_encoded_json() {
        let payload = SalesOrderLinePayload {
            id: 0,
            so_id: 42,
            item_id: 5,
            unit_id: 9,
            qty: 3.0,
            rate: 10.5,
            amount: 31.5,
        };
        let url = ApiRequest::new(ApiOp::SaveDetail)
            .json(&[payload])
            .unwrap()
            .to_url(BASE, None);
        assert!(url.starts_with(&format!("{}?OP=SAL_SalesOrderDetail_Save&json=", BASE)));
        let encoded = url.split("json=").nth(1).unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        assert_eq!(
            decoded,
            r#"[{"IDNumber":0,"SOID":42,"ItemID":5,"UnitID":9,"Qty":3.0,"Rate":10.5,"Amount":31.5}]"#
        );
    }

    #[test]
    fn test_only_reads_get_a_cache_buster() {
        let ts = ApiRequest::new(ApiOp::FetchDivisions).cache_buster();
        assert!(ts.is_some_and(|t| t > 1_600_000_000_000));
        assert_eq!(ApiRequest::new(ApiOp::SaveDetail).cache_buster(), None);
    }

    #[test]
    fn test_base_with_query() {
        let url = ApiRequest::new(ApiOp::FetchDivisions).to_url("http://h/api?key=k", None);
        assert_eq!(url, "http://h/api?key=k&op=fetch_Sal_GetSalesDivision");
    }
}
