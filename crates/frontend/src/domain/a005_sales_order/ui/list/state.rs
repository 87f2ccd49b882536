use crate::shared::column_filter::{sort_rows, CellValue, ColumnFilter, ColumnFilters, FilterableRow};
use crate::shared::components::pagination_controls::DEFAULT_PAGE_SIZES;
use crate::shared::date_utils::DatePreset;
use crate::shared::list_utils::{clamp_page, page_slice, toggle_sort, total_pages};
use contracts::domain::a005_sales_order::{so_date_from_wire, SalesOrderMaster};
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use std::collections::HashSet;

pub const COL_ID: &str = "IDNumber";
pub const COL_SO_NO: &str = "SONo";
pub const COL_SO_DATE: &str = "SODate";
pub const COL_SO_TYPE: &str = "SOType";
pub const COL_CUSTOMER: &str = "CustomerName";

impl FilterableRow for SalesOrderMaster {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            COL_ID => CellValue::Number(self.id.value() as f64),
            COL_SO_NO => CellValue::numeric(&self.so_no),
            COL_SO_DATE => CellValue::date(so_date_from_wire(&self.so_date)),
            COL_SO_TYPE => CellValue::text(&self.so_type),
            COL_CUSTOMER => CellValue::text(&self.customer_name),
            _ => CellValue::Empty,
        }
    }
}

/// How a text column is filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFilterKind {
    /// Checkbox list of the distinct values
    MultiSelect,
    /// Too many distinct values for a list; substring search instead
    Contains,
}

pub fn text_filter_kind(distinct_count: usize, autocomplete_limit: usize) -> TextFilterKind {
    if distinct_count > autocomplete_limit {
        TextFilterKind::Contains
    } else {
        TextFilterKind::MultiSelect
    }
}

/// Filters, sort and page applied to the loaded masters
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filters: ColumnFilters,
    pub sort_field: String,
    pub sort_ascending: bool,
    /// 0-indexed
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: ColumnFilters::new(),
            sort_field: COL_ID.to_string(),
            sort_ascending: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZES[1],
        }
    }
}

/// One page of the filtered and sorted list
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub rows: Vec<SalesOrderMaster>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl ListQuery {
    pub fn run(&self, masters: &[SalesOrderMaster]) -> ListPage {
        let mut rows = self.filters.apply(masters);
        sort_rows(&mut rows, &self.sort_field, self.sort_ascending);
        let total_count = rows.len();
        let page = clamp_page(self.page, total_count, self.page_size);
        ListPage {
            rows: page_slice(&rows, page, self.page_size),
            total_count,
            total_pages: total_pages(total_count, self.page_size),
            page,
        }
    }

    pub fn sort_by(&mut self, column: &str) {
        let (field, ascending) = toggle_sort(&self.sort_field, self.sort_ascending, column);
        self.sort_field = field;
        self.sort_ascending = ascending;
    }

    /// Any filter change starts over at the first page
    pub fn set_filter(&mut self, column: &str, filter: ColumnFilter) {
        self.filters.set(column, filter);
        self.page = 0;
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.filters.clear(column);
        self.page = 0;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }
}

#[derive(Clone, Copy)]
pub struct SalesOrderListState {
    pub query: RwSignal<ListQuery>,
    /// Rows whose lines are shown
    pub expanded: RwSignal<HashSet<RecordId>>,
    pub date_preset: RwSignal<DatePreset>,
    pub filters_expanded: RwSignal<bool>,
}

pub fn create_state() -> SalesOrderListState {
    SalesOrderListState {
        query: RwSignal::new(ListQuery::default()),
        expanded: RwSignal::new(HashSet::new()),
        date_preset: RwSignal::new(DatePreset::All),
        filters_expanded: RwSignal::new(false),
    }
}

impl SalesOrderListState {
    pub fn toggle_expanded(&self, id: RecordId) {
        self.expanded.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn master(id: i64, so_no: &str, date: &str, so_type: &str, customer: &str) -> SalesOrderMaster {
        SalesOrderMaster {
            id: RecordId(id),
            so_no: so_no.to_string(),
            so_date: date.to_string(),
            division_id: Some(RecordId(1)),
            division: "North".to_string(),
            so_type_id: None,
            so_type: so_type.to_string(),
            customer_id: None,
            customer_name: customer.to_string(),
        }
    }

    fn sample() -> Vec<SalesOrderMaster> {
        vec![
            master(1, "10", "1/5/2024", "Local", "Acme"),
            master(2, "2", "2/5/2024", "Export", "acme"),
            master(3, "33", "3/5/2024", "Local", "Globex"),
            master(4, "", "", "Local", "Initech"),
        ]
    }

    fn ids(page: &ListPage) -> Vec<i64> {
        page.rows.iter().map(|m| m.id.value()).collect()
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let page = ListQuery::default().run(&sample());
        assert_eq!(ids(&page), vec![4, 3, 2, 1]);
        assert_eq!(page.total_count, 4);
    }

    #[test]
    fn test_multi_select_ignores_case() {
        let mut query = ListQuery::default();
        query.set_filter(
            COL_CUSTOMER,
            ColumnFilter::MultiSelect(BTreeSet::from(["ACME".to_string()])),
        );
        let page = query.run(&sample());
        assert_eq!(ids(&page), vec![2, 1]);
    }

    #[test]
    fn test_so_number_sorts_numerically_with_blank_last() {
        let mut query = ListQuery::default();
        query.sort_by(COL_SO_NO);
        assert!(query.sort_ascending);
        let page = query.run(&sample());
        assert_eq!(ids(&page), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_date_range_excludes_rows_without_date() {
        let mut query = ListQuery::default();
        query.set_filter(
            COL_SO_DATE,
            ColumnFilter::DateRange {
                from: NaiveDate::from_ymd_opt(2024, 2, 1),
                to: None,
            },
        );
        let page = query.run(&sample());
        assert_eq!(ids(&page), vec![3, 2]);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut query = ListQuery::default();
        query.set_page_size(1);
        query.page = 3;
        query.set_filter(COL_ID, ColumnFilter::NumberRange { from: Some(2.0), to: None });
        assert_eq!(query.page, 0);
        let page = query.run(&sample());
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page), vec![4]);
    }

    #[test]
    fn test_page_past_end_is_clamped() {
        let mut query = ListQuery::default();
        query.set_page_size(3);
        query.page = 7;
        let page = query.run(&sample());
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page), vec![1]);
    }

    #[test]
    fn test_text_filter_falls_back_above_limit() {
        assert_eq!(text_filter_kind(100, 100), TextFilterKind::MultiSelect);
        assert_eq!(text_filter_kind(101, 100), TextFilterKind::Contains);
    }
}
