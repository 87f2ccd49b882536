//! Division → {SO type, customer}: two siblings hanging off one root.

use crate::shared::cascade::{CascadeLink, LoadTicket};
use contracts::domain::a001_division::Division;
use contracts::domain::a002_so_type::SoType;
use contracts::domain::a003_customer::Customer;
use contracts::domain::common::RecordId;

/// Fetches a division change asks for; both are `None` on a cache hit
#[derive(Debug, Default)]
pub struct DivisionLoads {
    pub so_types: Option<LoadTicket<RecordId>>,
    pub customers: Option<LoadTicket<RecordId>>,
}

#[derive(Debug, Clone, Default)]
pub struct HeaderCascade {
    pub division: CascadeLink<(), Division>,
    pub so_type: CascadeLink<RecordId, SoType>,
    pub customer: CascadeLink<RecordId, Customer>,
}

impl HeaderCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Division options are loaded once per screen
    pub fn load_divisions(&mut self) -> Option<LoadTicket<()>> {
        self.division.request(Some(())).into_ticket()
    }

    /// New division: both children are cleared in this same update and
    /// pointed at the new parent. `None` clears and disables them.
    pub fn select_division(&mut self, id: Option<RecordId>) -> DivisionLoads {
        self.division.select(id);
        let parent = self.division.selected();
        DivisionLoads {
            so_types: self.so_type.request(parent).into_ticket(),
            customers: self.customer.request(parent).into_ticket(),
        }
    }

    /// Loaded order: keep its stored selections while the options arrive
    pub fn prime(
        &mut self,
        division_id: Option<RecordId>,
        so_type_id: Option<RecordId>,
        customer_id: Option<RecordId>,
    ) -> DivisionLoads {
        self.division.select(division_id);
        let parent = self.division.selected();
        DivisionLoads {
            so_types: self.so_type.prime(parent, so_type_id).into_ticket(),
            customers: self.customer.prime(parent, customer_id).into_ticket(),
        }
    }

    pub fn select_so_type(&mut self, id: Option<RecordId>) {
        if !self.so_type.is_disabled() {
            self.so_type.select(id);
        }
    }

    pub fn select_customer(&mut self, id: Option<RecordId>) {
        if !self.customer.is_disabled() {
            self.customer.select(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn division(id: i64) -> Division {
        Division {
            division_id: RecordId(id),
            division_name: format!("D{}", id),
        }
    }

    fn so_type(id: i64) -> SoType {
        SoType {
            so_type_id: RecordId(id),
            so_type: format!("T{}", id),
        }
    }

    fn customer(id: i64) -> Customer {
        Customer {
            customer_id: RecordId(id),
            cust_code_name: format!("C{}", id),
        }
    }

    /// Division 1 selected with its types and customers loaded and picked
    fn loaded() -> HeaderCascade {
        let mut cascade = HeaderCascade::new();
        let ticket = cascade.load_divisions().unwrap();
        cascade.division.resolve(ticket, vec![division(1), division(2)]);

        let loads = cascade.select_division(Some(RecordId(1)));
        cascade.so_type.resolve(loads.so_types.unwrap(), vec![so_type(10)]);
        cascade.customer.resolve(loads.customers.unwrap(), vec![customer(20)]);
        cascade.select_so_type(Some(RecordId(10)));
        cascade.select_customer(Some(RecordId(20)));
        cascade
    }

    #[test]
    fn test_new_division_clears_both_children_at_once() {
        let mut cascade = loaded();
        assert_eq!(cascade.so_type.selected(), Some(RecordId(10)));

        let loads = cascade.select_division(Some(RecordId(2)));
        assert_eq!(cascade.so_type.selected(), None);
        assert_eq!(cascade.customer.selected(), None);
        assert!(cascade.so_type.is_disabled());
        assert!(cascade.customer.is_disabled());
        assert_eq!(loads.so_types.as_ref().map(|t| *t.key()), Some(RecordId(2)));
        assert_eq!(loads.customers.as_ref().map(|t| *t.key()), Some(RecordId(2)));
    }

    #[test]
    fn test_returning_to_division_uses_cache() {
        let mut cascade = loaded();
        let loads = cascade.select_division(Some(RecordId(2)));
        cascade.so_type.resolve(loads.so_types.unwrap(), vec![so_type(11)]);
        cascade.customer.resolve(loads.customers.unwrap(), vec![customer(21)]);

        let loads = cascade.select_division(Some(RecordId(1)));
        assert!(loads.so_types.is_none());
        assert!(loads.customers.is_none());
        assert_eq!(cascade.so_type.options(), &[so_type(10)]);
        assert_eq!(cascade.customer.options(), &[customer(20)]);
        // cleared even though the options came from the cache
        assert_eq!(cascade.so_type.selected(), None);
    }

    #[test]
    fn test_clearing_division_disables_children() {
        let mut cascade = loaded();
        let loads = cascade.select_division(None);
        assert!(loads.so_types.is_none());
        assert!(cascade.so_type.is_disabled());
        assert!(cascade.customer.options().is_empty());

        cascade.select_so_type(Some(RecordId(10)));
        assert_eq!(cascade.so_type.selected(), None);
    }

    #[test]
    fn test_answer_for_previous_division_is_dropped() {
        let mut cascade = loaded();
        let first = cascade.select_division(Some(RecordId(2)));
        let second = cascade.select_division(Some(RecordId(3)));

        assert!(!cascade.so_type.resolve(first.so_types.unwrap(), vec![so_type(11)]));
        assert!(cascade.so_type.resolve(second.so_types.unwrap(), vec![so_type(12)]));
        assert_eq!(cascade.so_type.options(), &[so_type(12)]);
    }

    #[test]
    fn test_prime_keeps_loaded_selections() {
        let mut cascade = HeaderCascade::new();
        let loads = cascade.prime(Some(RecordId(1)), Some(RecordId(10)), Some(RecordId(20)));
        assert_eq!(cascade.division.selected(), Some(RecordId(1)));
        assert_eq!(cascade.so_type.selected(), Some(RecordId(10)));

        cascade.customer.resolve(loads.customers.unwrap(), vec![customer(20)]);
        assert_eq!(cascade.customer.selected_label(), "C20");
    }
}
