use crate::domain::common::{RecordId, SelectOption};
use crate::shared::wire::deserialize_text;
use serde::{Deserialize, Serialize};

/// Sales division, root of the header cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    #[serde(rename = "DivisionID")]
    pub division_id: RecordId,

    #[serde(rename = "DivisionName", default, deserialize_with = "deserialize_text")]
    pub division_name: String,
}

impl SelectOption for Division {
    fn option_id(&self) -> RecordId {
        self.division_id
    }

    fn option_label(&self) -> String {
        self.division_name.clone()
    }
}
