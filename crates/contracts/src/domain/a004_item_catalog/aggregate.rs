//! Four-level item classification: main group → sub main group → item → unit.
//!
//! Each level is fetched only once its parent is known. Field names follow
//! the server, including its `SubMianGroup` spelling.

use crate::domain::common::{deserialize_optional_id, RecordId, SelectOption};
use crate::shared::wire::deserialize_text;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainGroup {
    #[serde(rename = "MainGroupID")]
    pub main_group_id: RecordId,

    #[serde(rename = "MainGroup", default, deserialize_with = "deserialize_text")]
    pub main_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMainGroup {
    #[serde(rename = "SubMainGroupID")]
    pub sub_main_group_id: RecordId,

    #[serde(
        rename = "MainGroupID",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub main_group_id: Option<RecordId>,

    #[serde(
        rename = "SubMianGroup",
        alias = "SubMainGroup",
        default,
        deserialize_with = "deserialize_text"
    )]
    pub sub_main_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "ItemID")]
    pub item_id: RecordId,

    #[serde(
        rename = "SubMainGroupID",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub sub_main_group_id: Option<RecordId>,

    #[serde(
        rename = "MainGroupID",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub main_group_id: Option<RecordId>,

    #[serde(rename = "ItemName", default, deserialize_with = "deserialize_text")]
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "UnitID")]
    pub unit_id: RecordId,

    #[serde(rename = "ItemID", default, deserialize_with = "deserialize_optional_id")]
    pub item_id: Option<RecordId>,

    #[serde(rename = "Unit", default, deserialize_with = "deserialize_text")]
    pub unit: String,
}

impl SelectOption for MainGroup {
    fn option_id(&self) -> RecordId {
        self.main_group_id
    }

    fn option_label(&self) -> String {
        self.main_group.clone()
    }
}

impl SelectOption for SubMainGroup {
    fn option_id(&self) -> RecordId {
        self.sub_main_group_id
    }

    fn option_label(&self) -> String {
        self.sub_main_group.clone()
    }
}

impl SelectOption for Item {
    fn option_id(&self) -> RecordId {
        self.item_id
    }

    fn option_label(&self) -> String {
        self.item_name.clone()
    }
}

impl SelectOption for Unit {
    fn option_id(&self) -> RecordId {
        self.unit_id
    }

    fn option_label(&self) -> String {
        self.unit.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_main_group_uses_server_spelling() {
        let row: SubMainGroup = serde_json::from_str(
            r#"{"SubMainGroupID": 2, "MainGroupID": 1, "SubMianGroup": "Fasteners"}"#,
        )
        .unwrap();
        assert_eq!(row.sub_main_group_id, RecordId(2));
        assert_eq!(row.main_group_id, Some(RecordId(1)));
        assert_eq!(row.option_label(), "Fasteners");
    }

    #[test]
    fn test_unit_without_parent() {
        let unit: Unit = serde_json::from_str(r#"{"UnitID": "9", "Unit": "KG"}"#).unwrap();
        assert_eq!(unit.option_id(), RecordId(9));
        assert_eq!(unit.item_id, None);
    }
}
