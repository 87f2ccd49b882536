use crate::domain::common::{RecordId, SelectOption};
use crate::shared::wire::deserialize_text;
use serde::{Deserialize, Serialize};

/// Customer available in a division. `CustCodeName` is "code - name".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "CustomerId", alias = "CustomerID")]
    pub customer_id: RecordId,

    #[serde(rename = "CustCodeName", default, deserialize_with = "deserialize_text")]
    pub cust_code_name: String,
}

impl SelectOption for Customer {
    fn option_id(&self) -> RecordId {
        self.customer_id
    }

    fn option_label(&self) -> String {
        self.cust_code_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_accepts_both_id_spellings() {
        let a: Customer =
            serde_json::from_str(r#"{"CustomerId": 5, "CustCodeName": "C1 - Acme"}"#).unwrap();
        let b: Customer =
            serde_json::from_str(r#"{"CustomerID": "5", "CustCodeName": "C1 - Acme"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.option_label(), "C1 - Acme");
    }
}
