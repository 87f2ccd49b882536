//! Remote API contract: operation names, reply convention and error taxonomy.
//!
//! Every call is a GET against one endpoint with an `op` query key; write
//! operations use the upper-case `OP` key and carry a JSON array in `json`.
//! Replies are JSON arrays. Write replies follow the `ErrCode`/`ErrMsg`
//! convention: `[{"ErrCode": "1", ...}]` is the success shape. The master
//! delete may also acknowledge with `{"status": "success"}`.

use crate::domain::common::RecordId;
use crate::shared::wire::deserialize_strict_string;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Operation names as the server knows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOp {
    FetchDivisions,
    FetchSoTypes,
    FetchCustomers,
    FetchMainGroups,
    FetchSubMainGroups,
    FetchItems,
    FetchUnits,
    ListMasters,
    SelectMaster,
    SaveMaster,
    DeleteMaster,
    SelectDetails,
    SaveDetail,
    DeleteDetail,
}

impl ApiOp {
    pub fn name(&self) -> &'static str {
        match self {
            ApiOp::FetchDivisions => "fetch_Sal_GetSalesDivision",
            ApiOp::FetchSoTypes => "fetch_Sal_GetSOType",
            ApiOp::FetchCustomers => "fetch_Sal_GetCustDivWs",
            ApiOp::FetchMainGroups => "Gen_Fetch_ItemMainGroup",
            ApiOp::FetchSubMainGroups => "Gen_Fetch_ItemSubMainGroup",
            ApiOp::FetchItems => "Gen_Fetch_Item",
            ApiOp::FetchUnits => "Gen_Fetch_ItemUnit",
            ApiOp::ListMasters => "SAL_SalesOrderMaster_List",
            ApiOp::SelectMaster => "SAL_SalesOrderMaster_Select",
            ApiOp::SaveMaster => "SAL_SalesOrderMaster_Save",
            ApiOp::DeleteMaster => "SAL_SalesOrderMaster_Delete",
            ApiOp::SelectDetails => "SAL_SalesOrderDetail_Select",
            ApiOp::SaveDetail => "SAL_SalesOrderDetail_Save",
            ApiOp::DeleteDetail => "SAL_SalesOrderDetail_Delete",
        }
    }

    /// Query key carrying the operation name
    pub fn query_key(&self) -> &'static str {
        if self.is_save() {
            "OP"
        } else {
            "op"
        }
    }

    pub fn is_save(&self) -> bool {
        matches!(self, ApiOp::SaveMaster | ApiOp::SaveDetail)
    }

    /// Operations that answer with the `ErrCode` convention
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ApiOp::SaveMaster | ApiOp::DeleteMaster | ApiOp::SaveDetail | ApiOp::DeleteDetail
        )
    }

    /// The master delete endpoint may answer `{"status": "success"}` instead of an `ErrCode` row
    pub fn accepts_status_ack(&self) -> bool {
        matches!(self, ApiOp::DeleteMaster)
    }
}

/// Failure of a client operation, from the network up to business rules.
///
/// `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Parse(String),

    /// `ErrCode` other than `"1"`; carries `ErrMsg` or a fallback
    #[error("{0}")]
    Server(String),

    /// Rejected locally, nothing was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Prefixes transport failures with the action that failed,
    /// e.g. "Error saving record: Network error: ...".
    /// Server and validation messages are shown verbatim.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            ApiError::Network(_) | ApiError::Parse(_) => format!("{}: {}", action, self),
            ApiError::Server(msg) | ApiError::Validation(msg) => msg.clone(),
        }
    }
}

/// First row of a write reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiReply {
    #[serde(rename = "ErrCode", default, deserialize_with = "deserialize_strict_string")]
    pub err_code: Option<String>,

    #[serde(rename = "ErrMsg", default, deserialize_with = "deserialize_strict_string")]
    pub err_msg: Option<String>,

    /// Entity-specific fields (`SONO`, `IDNumber`, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ApiReply {
    pub const SUCCESS_CODE: &'static str = "1";

    pub fn is_success(&self) -> bool {
        self.err_code.as_deref() == Some(Self::SUCCESS_CODE)
    }

    pub fn field_text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn field_id(&self, key: &str) -> Option<RecordId> {
        self.fields
            .get(key)
            .and_then(|v| serde_json::from_value::<RecordId>(v.clone()).ok())
            .and_then(RecordId::non_zero)
    }
}

/// Applies the `ErrCode` convention to a raw write reply.
///
/// Anything that is not an array whose first element is an object with
/// `ErrCode == "1"` is a failure; `fallback` is used when the server gave
/// no usable `ErrMsg`.
pub fn interpret_reply(body: &Value, fallback: &str) -> Result<ApiReply, ApiError> {
    let first = body
        .as_array()
        .and_then(|rows| rows.first())
        .filter(|row| row.is_object())
        .ok_or_else(|| ApiError::Server(fallback.to_string()))?;

    let reply: ApiReply = serde_json::from_value(first.clone())
        .map_err(|_| ApiError::Server(fallback.to_string()))?;

    if reply.is_success() {
        Ok(reply)
    } else {
        let message = reply
            .err_msg
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Err(ApiError::Server(message))
    }
}

/// [`interpret_reply`] plus the `{"status": "success"}` acknowledgement
/// for operations that may send it
pub fn interpret_write_reply(op: ApiOp, body: &Value, fallback: &str) -> Result<ApiReply, ApiError> {
    let status_ack = body.get("status").and_then(Value::as_str) == Some("success");
    if op.accepts_status_ack() && status_ack {
        return Ok(ApiReply::default());
    }
    interpret_reply(body, fallback)
}

/// Decodes a read reply into rows. `null` is an empty list.
pub fn parse_rows<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string())),
        other => Err(ApiError::Parse(format!(
            "expected an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_reply_exposes_fields() {
        let body = json!([{ "ErrCode": "1", "SONO": "SO-1001", "IDNumber": 42 }]);
        let reply = interpret_reply(&body, "Error saving sales order").unwrap();
        assert_eq!(reply.field_text("SONO").as_deref(), Some("SO-1001"));
        assert_eq!(reply.field_id("IDNumber"), Some(RecordId(42)));
    }

    #[test]
    fn test_server_failure_uses_err_msg_verbatim() {
        let body = json!([{ "ErrCode": "0", "ErrMsg": "Referenced by invoice" }]);
        let err = interpret_reply(&body, "Error deleting sales order").unwrap_err();
        assert_eq!(err, ApiError::Server("Referenced by invoice".into()));
        assert_eq!(err.to_string(), "Referenced by invoice");
    }

    #[test]
    fn test_unexpected_shapes_are_failures() {
        let fallback = "Error saving record";
        for body in [
            json!([]),
            json!([{ "ErrMsg": "no code" }]),
            json!([{ "ErrCode": 1 }]),
            json!({ "ErrCode": "1" }),
            json!(null),
            json!(["1"]),
        ] {
            assert!(interpret_reply(&body, fallback).is_err(), "{body} must fail");
        }

        let err = interpret_reply(&json!([{ "ErrCode": "2", "ErrMsg": "" }]), fallback).unwrap_err();
        assert_eq!(err.to_string(), fallback);
    }

    #[test]
    fn test_status_ack_only_for_master_delete() {
        let body = json!({ "status": "success" });
        assert!(interpret_write_reply(ApiOp::DeleteMaster, &body, "Error deleting sales order").is_ok());
        assert!(interpret_write_reply(ApiOp::SaveMaster, &body, "Error saving record").is_err());
        assert!(interpret_write_reply(ApiOp::DeleteMaster, &json!({ "status": "failed" }), "x").is_err());

        let err = interpret_write_reply(
            ApiOp::DeleteMaster,
            &json!([{ "ErrCode": "0", "ErrMsg": "Referenced by invoice" }]),
            "Error deleting sales order",
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Referenced by invoice");
    }

    #[test]
    fn test_parse_rows() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(rename = "ID")]
            id: RecordId,
        }

        let rows: Vec<Row> = parse_rows(json!([{ "ID": 1 }, { "ID": "2" }])).unwrap();
        assert_eq!(rows.iter().map(|r| r.id.value()).collect::<Vec<_>>(), vec![1, 2]);

        let rows: Vec<Row> = parse_rows(Value::Null).unwrap();
        assert!(rows.is_empty());

        assert!(matches!(
            parse_rows::<Row>(json!({ "ID": 1 })),
            Err(ApiError::Parse(_))
        ));
    }

    #[test]
    fn test_op_query_keys() {
        assert_eq!(ApiOp::SaveMaster.query_key(), "OP");
        assert_eq!(ApiOp::SaveDetail.query_key(), "OP");
        assert_eq!(ApiOp::DeleteDetail.query_key(), "op");
        assert_eq!(ApiOp::FetchItems.name(), "Gen_Fetch_Item");
    }

    #[test]
    fn test_user_message() {
        let err = ApiError::Network("timeout".into());
        assert_eq!(
            err.user_message("Error saving record"),
            "Error saving record: Network error: timeout"
        );
        assert_eq!(
            ApiError::Server("Duplicate SO".into()).user_message("Error saving record"),
            "Duplicate SO"
        );
    }
}
