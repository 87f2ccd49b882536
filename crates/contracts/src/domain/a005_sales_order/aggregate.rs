use crate::domain::common::{deserialize_optional_id, RecordId};
use crate::shared::api::ApiReply;
use crate::shared::wire::deserialize_text;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in the SO number field until the server assigns one
pub const SO_NUMBER_PLACEHOLDER: &str = "Auto";

/// Date format the save operation expects, e.g. `15/Jan/2024`
const WIRE_DATE_FORMAT: &str = "%d/%b/%Y";

/// Formats the server has been seen to send `SODate` in
const INCOMING_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d/%b/%Y", "%d-%b-%Y"];

/// Sales order header as listed by `SAL_SalesOrderMaster_List` and
/// returned by `SAL_SalesOrderMaster_Select`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderMaster {
    #[serde(rename = "IDNumber")]
    pub id: RecordId,

    #[serde(rename = "SONo", default, deserialize_with = "deserialize_text")]
    pub so_no: String,

    /// Raw server text, see [`so_date_from_wire`]
    #[serde(rename = "SODate", default, deserialize_with = "deserialize_text")]
    pub so_date: String,

    #[serde(rename = "DivisionID", default, deserialize_with = "deserialize_optional_id")]
    pub division_id: Option<RecordId>,

    #[serde(rename = "Division", default, deserialize_with = "deserialize_text")]
    pub division: String,

    #[serde(rename = "SOTypeID", default, deserialize_with = "deserialize_optional_id")]
    pub so_type_id: Option<RecordId>,

    #[serde(rename = "SOType", default, deserialize_with = "deserialize_text")]
    pub so_type: String,

    #[serde(rename = "CustomerID", default, deserialize_with = "deserialize_optional_id")]
    pub customer_id: Option<RecordId>,

    #[serde(rename = "CustomerName", default, deserialize_with = "deserialize_text")]
    pub customer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MasterValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Invalid SO date: {0}")]
    InvalidDate(String),
}

/// Ids the save operation expects from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIds {
    pub year_id: i64,
    pub login_id: i64,
}

/// Header values being edited on the form, reduced to what the save needs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesOrderHeader {
    /// `RecordId::NEW` until the first successful save
    pub id: RecordId,
    /// Server-assigned number; empty while new
    pub so_no: String,
    /// `YYYY-MM-DD`
    pub so_date: String,
    pub division_id: Option<RecordId>,
    pub so_type_id: Option<RecordId>,
    pub customer_id: Option<RecordId>,
}

/// Single element of the `json` array sent to `SAL_SalesOrderMaster_Save`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOrderMasterPayload {
    #[serde(rename = "IDNumber")]
    pub id: i64,
    #[serde(rename = "SONo")]
    pub so_no: String,
    #[serde(rename = "SODate")]
    pub so_date: String,
    #[serde(rename = "SOTypeID")]
    pub so_type_id: i64,
    #[serde(rename = "CustomerID")]
    pub customer_id: i64,
    #[serde(rename = "YearID")]
    pub year_id: i64,
    #[serde(rename = "DivisionID")]
    pub division_id: i64,
    #[serde(rename = "LoginID")]
    pub login_id: i64,
}

impl SalesOrderHeader {
    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    pub fn validate(&self) -> Result<(), MasterValidationError> {
        if self.so_date.trim().is_empty()
            || self.division_id.is_none()
            || self.so_type_id.is_none()
            || self.customer_id.is_none()
        {
            return Err(MasterValidationError::MissingFields);
        }
        Ok(())
    }

    pub fn to_payload(
        &self,
        session: SessionIds,
    ) -> Result<SalesOrderMasterPayload, MasterValidationError> {
        self.validate()?;
        let (Some(division_id), Some(so_type_id), Some(customer_id)) =
            (self.division_id, self.so_type_id, self.customer_id)
        else {
            return Err(MasterValidationError::MissingFields);
        };

        Ok(SalesOrderMasterPayload {
            id: self.id.value(),
            so_no: if self.is_new() {
                String::new()
            } else {
                self.so_no.clone()
            },
            so_date: so_date_to_wire(&self.so_date)?,
            so_type_id: so_type_id.value(),
            customer_id: customer_id.value(),
            year_id: session.year_id,
            division_id: division_id.value(),
            login_id: session.login_id,
        })
    }
}

/// Result of a successful master save
#[derive(Debug, Clone, PartialEq)]
pub struct MasterSaved {
    pub id: RecordId,
    pub so_no: String,
}

impl MasterSaved {
    /// The reply carries `SONO` and, on create, `IDNumber`.
    /// Updates keep the id that was sent.
    pub fn from_reply(reply: &ApiReply, sent_id: RecordId) -> Self {
        Self {
            id: reply.field_id("IDNumber").unwrap_or(sent_id),
            so_no: reply
                .field_text("SONO")
                .or_else(|| reply.field_text("SONo"))
                .unwrap_or_default(),
        }
    }
}

/// `2024-01-15` → `15/Jan/2024`
pub fn so_date_to_wire(iso_date: &str) -> Result<String, MasterValidationError> {
    let date_part = iso_date.split('T').next().unwrap_or(iso_date).trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(|d| d.format(WIRE_DATE_FORMAT).to_string())
        .map_err(|_| MasterValidationError::InvalidDate(iso_date.to_string()))
}

/// Parses a server `SODate` such as `1/15/2024`, `1/15/2024 12:00:00 AM`
/// or `2024-01-15T00:00:00`.
pub fn so_date_from_wire(raw: &str) -> Option<NaiveDate> {
    let token = raw.split_whitespace().next()?;
    let token = token.split('T').next().unwrap_or(token);
    INCOMING_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SESSION: SessionIds = SessionIds {
        year_id: 1,
        login_id: 1,
    };

    fn filled_header() -> SalesOrderHeader {
        SalesOrderHeader {
            id: RecordId::NEW,
            so_no: String::new(),
            so_date: "2024-01-15".into(),
            division_id: Some(RecordId(1)),
            so_type_id: Some(RecordId(2)),
            customer_id: Some(RecordId(3)),
        }
    }

    #[test]
    fn test_new_header_payload() {
        let payload = filled_header().to_payload(SESSION).unwrap();
        assert_eq!(payload.id, 0);
        assert_eq!(payload.so_no, "");
        assert_eq!(payload.so_date, "15/Jan/2024");

        let json = serde_json::to_value(vec![payload]).unwrap();
        assert_eq!(
            json,
            json!([{
                "IDNumber": 0,
                "SONo": "",
                "SODate": "15/Jan/2024",
                "SOTypeID": 2,
                "CustomerID": 3,
                "YearID": 1,
                "DivisionID": 1,
                "LoginID": 1
            }])
        );
    }

    #[test]
    fn test_existing_header_keeps_number() {
        let header = SalesOrderHeader {
            id: RecordId(42),
            so_no: "SO-1001".into(),
            ..filled_header()
        };
        let payload = header.to_payload(SESSION).unwrap();
        assert_eq!(payload.id, 42);
        assert_eq!(payload.so_no, "SO-1001");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let header = SalesOrderHeader {
            so_type_id: None,
            ..filled_header()
        };
        assert_eq!(header.validate(), Err(MasterValidationError::MissingFields));
        assert_eq!(
            MasterValidationError::MissingFields.to_string(),
            "Please fill in all required fields"
        );

        let header = SalesOrderHeader {
            so_date: "  ".into(),
            ..filled_header()
        };
        assert!(header.to_payload(SESSION).is_err());
    }

    #[test]
    fn test_master_saved_from_reply() {
        let reply: ApiReply =
            serde_json::from_value(json!({ "ErrCode": "1", "SONO": "SO-1001", "IDNumber": 42 }))
                .unwrap();
        let saved = MasterSaved::from_reply(&reply, RecordId::NEW);
        assert_eq!(saved.id, RecordId(42));
        assert_eq!(saved.so_no, "SO-1001");

        let reply: ApiReply =
            serde_json::from_value(json!({ "ErrCode": "1", "SONO": "SO-7" })).unwrap();
        assert_eq!(MasterSaved::from_reply(&reply, RecordId(7)).id, RecordId(7));
    }

    #[test]
    fn test_so_date_from_wire() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(so_date_from_wire("1/15/2024"), expected);
        assert_eq!(so_date_from_wire("01/15/2024 12:00:00 AM"), expected);
        assert_eq!(so_date_from_wire("2024-01-15T00:00:00"), expected);
        assert_eq!(so_date_from_wire("15/Jan/2024"), expected);
        assert_eq!(so_date_from_wire(""), None);
        assert_eq!(so_date_from_wire("soon"), None);
    }

    #[test]
    fn test_master_row_decoding() {
        let row: SalesOrderMaster = serde_json::from_value(json!({
            "IDNumber": "42",
            "SONo": 1001,
            "SODate": "1/15/2024",
            "DivisionID": 1,
            "Division": "D1",
            "SOTypeID": 2,
            "SOType": "T1",
            "CustomerID": 3,
            "CustomerName": "C1"
        }))
        .unwrap();
        assert_eq!(row.id, RecordId(42));
        assert_eq!(row.so_no, "1001");
        assert_eq!(row.customer_id, Some(RecordId(3)));
    }
}
