use crate::domain::common::{deserialize_optional_id, RecordId};
use crate::shared::wire::{deserialize_number, deserialize_text};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line item of a sales order as returned by `SAL_SalesOrderDetail_Select`.
///
/// Display names travel with the ids so the read-only grid needs no
/// reference lookups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesOrderLine {
    /// `SODetID` on the wire; `RecordId::NEW` for a line not yet saved
    #[serde(rename = "SODetID", alias = "IDNumber", default)]
    pub id: RecordId,

    #[serde(rename = "SOID", default, deserialize_with = "deserialize_optional_id")]
    pub so_id: Option<RecordId>,

    #[serde(rename = "MainGroupID", default, deserialize_with = "deserialize_optional_id")]
    pub main_group_id: Option<RecordId>,

    #[serde(rename = "MainGroup", default, deserialize_with = "deserialize_text")]
    pub main_group: String,

    #[serde(rename = "SubMainGroupID", default, deserialize_with = "deserialize_optional_id")]
    pub sub_main_group_id: Option<RecordId>,

    #[serde(
        rename = "SubMianGroup",
        alias = "SubMainGroup",
        default,
        deserialize_with = "deserialize_text"
    )]
    pub sub_main_group: String,

    #[serde(rename = "ItemID", default, deserialize_with = "deserialize_optional_id")]
    pub item_id: Option<RecordId>,

    #[serde(rename = "ItemName", default, deserialize_with = "deserialize_text")]
    pub item_name: String,

    #[serde(rename = "UnitID", default, deserialize_with = "deserialize_optional_id")]
    pub unit_id: Option<RecordId>,

    #[serde(rename = "Unit", default, deserialize_with = "deserialize_text")]
    pub unit: String,

    #[serde(rename = "Qty", default, deserialize_with = "deserialize_number")]
    pub qty: f64,

    #[serde(rename = "Rate", default, deserialize_with = "deserialize_number")]
    pub rate: f64,

    #[serde(rename = "Amount", default, deserialize_with = "deserialize_number")]
    pub amount: f64,
}

/// Identity of a line within one order: no two lines share it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub main_group_id: Option<RecordId>,
    pub sub_main_group_id: Option<RecordId>,
    pub item_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineValidationError {
    #[error("Please fill all required fields")]
    MissingFields,

    #[error("Quantity must be greater than 0")]
    NonPositiveQty,

    #[error("Rate must be greater than 0")]
    NonPositiveRate,

    #[error(
        "Duplicate row detected. A row with the same Main Group, Sub Main Group, and Item already exists."
    )]
    Duplicate,
}

/// Single element of the `json` array sent to `SAL_SalesOrderDetail_Save`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOrderLinePayload {
    #[serde(rename = "IDNumber")]
    pub id: i64,
    #[serde(rename = "SOID")]
    pub so_id: i64,
    #[serde(rename = "ItemID")]
    pub item_id: i64,
    #[serde(rename = "UnitID")]
    pub unit_id: i64,
    #[serde(rename = "Qty")]
    pub qty: f64,
    #[serde(rename = "Rate")]
    pub rate: f64,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

pub fn calculate_amount(qty: f64, rate: f64) -> f64 {
    qty * rate
}

/// Sum of `Amount` over the lines, for the grid footer
pub fn total_amount(lines: &[SalesOrderLine]) -> f64 {
    lines.iter().map(|l| l.amount).sum()
}

/// True when another line (ignoring `exclude`) already holds `key`
pub fn has_duplicate(lines: &[SalesOrderLine], key: LineKey, exclude: Option<RecordId>) -> bool {
    lines
        .iter()
        .filter(|l| Some(l.id) != exclude)
        .any(|l| l.key() == key)
}

impl SalesOrderLine {
    /// Blank draft: no selections, zero quantities
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            main_group_id: self.main_group_id,
            sub_main_group_id: self.sub_main_group_id,
            item_id: self.item_id,
        }
    }

    pub fn set_qty(&mut self, qty: f64) {
        self.qty = qty;
        self.recalculate();
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.recalculate();
    }

    pub fn recalculate(&mut self) {
        self.amount = calculate_amount(self.qty, self.rate);
    }

    /// Presence and positivity checks; first failure wins
    pub fn validate(&self) -> Result<(), LineValidationError> {
        if self.main_group_id.is_none()
            || self.sub_main_group_id.is_none()
            || self.item_id.is_none()
            || self.unit_id.is_none()
        {
            return Err(LineValidationError::MissingFields);
        }
        // NaN must not slip through as "not <= 0"
        if !(self.qty > 0.0) {
            return Err(LineValidationError::NonPositiveQty);
        }
        if !(self.rate > 0.0) {
            return Err(LineValidationError::NonPositiveRate);
        }
        Ok(())
    }

    /// Validation followed by the sibling duplicate check.
    /// An existing line is excluded from the check against itself.
    pub fn validate_against(&self, siblings: &[SalesOrderLine]) -> Result<(), LineValidationError> {
        self.validate()?;
        let exclude = self.id.non_zero();
        if has_duplicate(siblings, self.key(), exclude) {
            return Err(LineValidationError::Duplicate);
        }
        Ok(())
    }

    pub fn to_payload(&self, so_id: RecordId) -> Result<SalesOrderLinePayload, LineValidationError> {
        let (Some(item_id), Some(unit_id)) = (self.item_id, self.unit_id) else {
            return Err(LineValidationError::MissingFields);
        };
        Ok(SalesOrderLinePayload {
            id: self.id.value(),
            so_id: so_id.value(),
            item_id: item_id.value(),
            unit_id: unit_id.value(),
            qty: self.qty,
            rate: self.rate,
            amount: calculate_amount(self.qty, self.rate),
        })
    }
}
