use crate::shared::date_utils::to_input_value;
use chrono::NaiveDate;
use contracts::domain::a005_sales_order::{
    so_date_from_wire, MasterSaved, SalesOrderHeader, SalesOrderMaster, SO_NUMBER_PLACEHOLDER,
};
use contracts::domain::common::RecordId;

/// Header fields of the sales order form
#[derive(Debug, Clone, PartialEq)]
pub struct SalesOrderForm {
    pub id: RecordId,
    pub so_no: String,
    /// `YYYY-MM-DD`, as a date input holds it
    pub so_date: String,
    pub division_id: Option<RecordId>,
    pub so_type_id: Option<RecordId>,
    pub customer_id: Option<RecordId>,
}

impl SalesOrderForm {
    /// Empty form dated `today`
    pub fn new_order(today: NaiveDate) -> Self {
        Self {
            id: RecordId::NEW,
            so_no: String::new(),
            so_date: to_input_value(today),
            division_id: None,
            so_type_id: None,
            customer_id: None,
        }
    }

    /// Empty form bound to a stored order before its fields arrive, so a
    /// save after a failed load still updates `id` instead of creating
    pub fn for_existing(id: RecordId, today: NaiveDate) -> Self {
        Self {
            id,
            ..Self::new_order(today)
        }
    }

    /// Loaded order; an unreadable `SODate` falls back to `today`
    pub fn from_master(master: &SalesOrderMaster, today: NaiveDate) -> Self {
        let date = so_date_from_wire(&master.so_date).unwrap_or_else(|| {
            log::warn!("unreadable SODate {:?} on order {}", master.so_date, master.id);
            today
        });
        Self {
            id: master.id,
            so_no: master.so_no.clone(),
            so_date: to_input_value(date),
            division_id: master.division_id,
            so_type_id: master.so_type_id,
            customer_id: master.customer_id,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_new()
    }

    /// Text of the read-only number field
    pub fn so_no_display(&self) -> String {
        if self.so_no.trim().is_empty() {
            SO_NUMBER_PLACEHOLDER.to_string()
        } else {
            self.so_no.clone()
        }
    }

    pub fn to_header(&self) -> SalesOrderHeader {
        SalesOrderHeader {
            id: self.id,
            so_no: self.so_no.clone(),
            so_date: self.so_date.clone(),
            division_id: self.division_id,
            so_type_id: self.so_type_id,
            customer_id: self.customer_id,
        }
    }

    /// Takes over the id and number the server assigned
    pub fn apply_saved(&mut self, saved: &MasterSaved) {
        self.id = saved.id;
        if !saved.so_no.trim().is_empty() {
            self.so_no = saved.so_no.clone();
        }
    }
}

/// "Sales Order #42 saved successfully!" for a create, "updated" otherwise
pub fn saved_message(so_no: &str, was_new: bool) -> String {
    format!(
        "Sales Order #{} {} successfully!",
        so_no,
        if was_new { "saved" } else { "updated" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_sales_order::SessionIds;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn master(so_date: &str) -> SalesOrderMaster {
        SalesOrderMaster {
            id: RecordId(12),
            so_no: "SO-0012".to_string(),
            so_date: so_date.to_string(),
            division_id: Some(RecordId(1)),
            division: "North".to_string(),
            so_type_id: Some(RecordId(3)),
            so_type: "Local".to_string(),
            customer_id: Some(RecordId(7)),
            customer_name: "Acme".to_string(),
        }
    }

    #[test]
    fn test_new_order_shows_auto_number() {
        let form = SalesOrderForm::new_order(date(2024, 3, 5));
        assert!(form.is_new());
        assert_eq!(form.so_date, "2024-03-05");
        assert_eq!(form.so_no_display(), "Auto");
    }

    #[test]
    fn test_edit_form_keeps_route_id_before_load() {
        let mut form = SalesOrderForm::for_existing(RecordId(42), date(2024, 3, 5));
        assert!(!form.is_new());
        assert_eq!(form.so_no_display(), "Auto");

        // the load failed and the user filled the fields by hand
        form.division_id = Some(RecordId(1));
        form.so_type_id = Some(RecordId(2));
        form.customer_id = Some(RecordId(3));
        let session = SessionIds {
            year_id: 1,
            login_id: 1,
        };
        let payload = form.to_header().to_payload(session).unwrap();
        assert_eq!(payload.id, 42);
    }

    #[test]
    fn test_from_master_converts_server_date() {
        let form = SalesOrderForm::from_master(&master("1/15/2024 12:00:00 AM"), date(2024, 3, 5));
        assert_eq!(form.so_date, "2024-01-15");
        assert_eq!(form.so_no_display(), "SO-0012");
        assert_eq!(form.customer_id, Some(RecordId(7)));
    }

    #[test]
    fn test_unreadable_date_falls_back_to_today() {
        let form = SalesOrderForm::from_master(&master("not a date"), date(2024, 3, 5));
        assert_eq!(form.so_date, "2024-03-05");
    }

    #[test]
    fn test_header_carries_form_values() {
        let form = SalesOrderForm::from_master(&master("2024-01-15"), date(2024, 3, 5));
        let header = form.to_header();
        assert_eq!(header.id, RecordId(12));
        assert_eq!(header.so_date, "2024-01-15");
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_apply_saved_assigns_id_and_number() {
        let mut form = SalesOrderForm::new_order(date(2024, 3, 5));
        form.apply_saved(&MasterSaved {
            id: RecordId(40),
            so_no: "SO-0040".to_string(),
        });
        assert!(!form.is_new());
        assert_eq!(form.so_no_display(), "SO-0040");
    }

    #[test]
    fn test_saved_message_wording() {
        assert_eq!(saved_message("9", true), "Sales Order #9 saved successfully!");
        assert_eq!(saved_message("9", false), "Sales Order #9 updated successfully!");
    }
}
