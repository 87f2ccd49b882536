//! Main group → sub main group → item → unit, one link feeding the next.

use crate::shared::cascade::{CascadeLink, LoadTicket};
use contracts::domain::a004_item_catalog::{Item, MainGroup, SubMainGroup, Unit};
use contracts::domain::a006_sales_order_line::SalesOrderLine;
use contracts::domain::common::RecordId;

/// Fetch a cascade change asks for
#[derive(Debug)]
pub enum ItemLoad {
    SubMainGroups(LoadTicket<RecordId>),
    Items(LoadTicket<(RecordId, RecordId)>),
    Units(LoadTicket<RecordId>),
}

#[derive(Debug, Clone, Default)]
pub struct ItemCascade {
    pub main_group: CascadeLink<(), MainGroup>,
    pub sub_main_group: CascadeLink<RecordId, SubMainGroup>,
    pub item: CascadeLink<(RecordId, RecordId), Item>,
    pub unit: CascadeLink<RecordId, Unit>,
}

impl ItemCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_main_groups(&mut self) -> Option<LoadTicket<()>> {
        self.main_group.request(Some(())).into_ticket()
    }

    pub fn select_main_group(&mut self, id: Option<RecordId>) -> Option<ItemLoad> {
        self.main_group.select(id);
        self.item.reset();
        self.unit.reset();
        self.sub_main_group
            .request(self.main_group.selected())
            .into_ticket()
            .map(ItemLoad::SubMainGroups)
    }

    pub fn select_sub_main_group(&mut self, id: Option<RecordId>) -> Option<ItemLoad> {
        self.sub_main_group.select(id);
        self.unit.reset();
        let key = self.main_group.selected().zip(self.sub_main_group.selected());
        self.item.request(key).into_ticket().map(ItemLoad::Items)
    }

    pub fn select_item(&mut self, id: Option<RecordId>) -> Option<ItemLoad> {
        self.item.select(id);
        self.unit
            .request(self.item.selected())
            .into_ticket()
            .map(ItemLoad::Units)
    }

    pub fn select_unit(&mut self, id: Option<RecordId>) {
        self.unit.select(id);
    }

    /// A stored line opened for editing: every level keeps the line's
    /// selection and loads the options for the line's ancestors.
    pub fn preload(&mut self, line: &SalesOrderLine) -> Vec<ItemLoad> {
        self.main_group.select(line.main_group_id);
        let main = self.main_group.selected();
        let mut loads = Vec::new();
        if let Some(t) = self.sub_main_group.prime(main, line.sub_main_group_id).into_ticket() {
            loads.push(ItemLoad::SubMainGroups(t));
        }
        let key = main.zip(self.sub_main_group.selected());
        if let Some(t) = self.item.prime(key, line.item_id).into_ticket() {
            loads.push(ItemLoad::Items(t));
        }
        if let Some(t) = self.unit.prime(self.item.selected(), line.unit_id).into_ticket() {
            loads.push(ItemLoad::Units(t));
        }
        loads
    }

    /// Back to an empty draft: only the root keeps its options
    pub fn clear(&mut self) {
        self.main_group.select(None);
        self.sub_main_group.reset();
        self.item.reset();
        self.unit.reset();
    }

    /// Writes the current selections and their labels into `line`
    pub fn apply_to(&self, line: &mut SalesOrderLine) {
        line.main_group_id = self.main_group.selected();
        line.main_group = self.main_group.selected_label();
        line.sub_main_group_id = self.sub_main_group.selected();
        line.sub_main_group = self.sub_main_group.selected_label();
        line.item_id = self.item.selected();
        line.item_name = self.item.selected_label();
        line.unit_id = self.unit.selected();
        line.unit = self.unit.selected_label();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_group(id: i64) -> MainGroup {
        MainGroup {
            main_group_id: RecordId(id),
            main_group: format!("M{}", id),
        }
    }

    fn sub(id: i64) -> SubMainGroup {
        SubMainGroup {
            sub_main_group_id: RecordId(id),
            main_group_id: None,
            sub_main_group: format!("S{}", id),
        }
    }

    fn item(id: i64) -> Item {
        Item {
            item_id: RecordId(id),
            sub_main_group_id: None,
            main_group_id: None,
            item_name: format!("I{}", id),
        }
    }

    fn unit(id: i64) -> Unit {
        Unit {
            unit_id: RecordId(id),
            item_id: None,
            unit: format!("U{}", id),
        }
    }

    fn resolve(cascade: &mut ItemCascade, load: Option<ItemLoad>) {
        match load {
            Some(ItemLoad::SubMainGroups(t)) => {
                cascade.sub_main_group.resolve(t, vec![sub(2), sub(3)]);
            }
            Some(ItemLoad::Items(t)) => {
                cascade.item.resolve(t, vec![item(5), item(6)]);
            }
            Some(ItemLoad::Units(t)) => {
                cascade.unit.resolve(t, vec![unit(9)]);
            }
            None => {}
        }
    }

    fn fully_selected() -> ItemCascade {
        let mut cascade = ItemCascade::new();
        let ticket = cascade.load_main_groups().unwrap();
        cascade.main_group.resolve(ticket, vec![main_group(1), main_group(4)]);
        let load = cascade.select_main_group(Some(RecordId(1)));
        resolve(&mut cascade, load);
        let load = cascade.select_sub_main_group(Some(RecordId(2)));
        resolve(&mut cascade, load);
        let load = cascade.select_item(Some(RecordId(5)));
        resolve(&mut cascade, load);
        cascade.select_unit(Some(RecordId(9)));
        cascade
    }

    #[test]
    fn test_items_are_keyed_by_both_groups() {
        let mut cascade = ItemCascade::new();
        cascade.main_group.select(Some(RecordId(1)));
        let load = cascade.select_sub_main_group(Some(RecordId(2)));
        match load {
            Some(ItemLoad::Items(t)) => assert_eq!(t.key(), &(RecordId(1), RecordId(2))),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_changing_main_group_clears_everything_below() {
        let mut cascade = fully_selected();
        let load = cascade.select_main_group(Some(RecordId(4)));
        assert!(matches!(load, Some(ItemLoad::SubMainGroups(_))));
        assert_eq!(cascade.sub_main_group.selected(), None);
        assert_eq!(cascade.item.selected(), None);
        assert_eq!(cascade.unit.selected(), None);
        assert!(cascade.item.is_disabled());
        assert!(cascade.unit.is_disabled());
    }

    #[test]
    fn test_changing_item_keeps_groups() {
        let mut cascade = fully_selected();
        let load = cascade.select_item(Some(RecordId(6)));
        assert!(matches!(load, Some(ItemLoad::Units(_))));
        assert_eq!(cascade.sub_main_group.selected(), Some(RecordId(2)));
        assert_eq!(cascade.unit.selected(), None);
    }

    #[test]
    fn test_revisit_needs_no_fetch() {
        let mut cascade = fully_selected();
        let load = cascade.select_main_group(Some(RecordId(4)));
        resolve(&mut cascade, load);

        assert!(cascade.select_main_group(Some(RecordId(1))).is_none());
        assert!(cascade.select_sub_main_group(Some(RecordId(2))).is_none());
        assert!(cascade.select_item(Some(RecordId(5))).is_none());
        assert_eq!(cascade.unit.options(), &[unit(9)]);
    }

    #[test]
    fn test_apply_to_copies_ids_and_labels() {
        let cascade = fully_selected();
        let mut line = SalesOrderLine::blank();
        cascade.apply_to(&mut line);
        assert_eq!(line.main_group_id, Some(RecordId(1)));
        assert_eq!(line.sub_main_group, "S2");
        assert_eq!(line.item_name, "I5");
        assert_eq!(line.unit_id, Some(RecordId(9)));
    }

    #[test]
    fn test_preload_primes_all_levels() {
        let mut cascade = ItemCascade::new();
        let line = SalesOrderLine {
            main_group_id: Some(RecordId(1)),
            sub_main_group_id: Some(RecordId(2)),
            item_id: Some(RecordId(5)),
            unit_id: Some(RecordId(9)),
            ..SalesOrderLine::blank()
        };
        let loads = cascade.preload(&line);
        assert_eq!(loads.len(), 3);
        assert_eq!(cascade.item.selected(), Some(RecordId(5)));
        assert_eq!(cascade.unit.selected(), Some(RecordId(9)));

        for load in loads {
            resolve(&mut cascade, Some(load));
        }
        assert_eq!(cascade.unit.selected_label(), "U9");
    }
}
