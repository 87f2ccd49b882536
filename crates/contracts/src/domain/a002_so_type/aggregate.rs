use crate::domain::common::{RecordId, SelectOption};
use crate::shared::wire::deserialize_text;
use serde::{Deserialize, Serialize};

/// Sales order type, scoped to a division
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoType {
    #[serde(rename = "SOTypeID")]
    pub so_type_id: RecordId,

    #[serde(rename = "SOType", default, deserialize_with = "deserialize_text")]
    pub so_type: String,
}

impl SelectOption for SoType {
    fn option_id(&self) -> RecordId {
        self.so_type_id
    }

    fn option_label(&self) -> String {
        self.so_type.clone()
    }
}
