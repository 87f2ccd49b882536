//! Client-side column filters and the comparator used for column sorting.
//!
//! Rows expose their columns as [`CellValue`]s through [`FilterableRow`];
//! filters and sorting work on those values only, so any grid can reuse them.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Typed view of one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn text(value: &str) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }

    /// Numeric text becomes a number, anything else stays text
    pub fn numeric(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => Self::text(value),
        }
    }

    pub fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Date)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

pub trait FilterableRow {
    fn cell(&self, column: &str) -> CellValue;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    /// Case-insensitive equality with any of the chosen values
    MultiSelect(BTreeSet<String>),
    /// Case-insensitive substring, for columns with too many distinct values
    Contains(String),
    /// Inclusive bounds; a missing bound is open
    NumberRange { from: Option<f64>, to: Option<f64> },
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl ColumnFilter {
    pub fn is_active(&self) -> bool {
        match self {
            ColumnFilter::MultiSelect(values) => !values.is_empty(),
            ColumnFilter::Contains(needle) => !needle.trim().is_empty(),
            ColumnFilter::NumberRange { from, to } => from.is_some() || to.is_some(),
            ColumnFilter::DateRange { from, to } => from.is_some() || to.is_some(),
        }
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        if !self.is_active() {
            return true;
        }
        match self {
            ColumnFilter::MultiSelect(values) => cell.as_text().is_some_and(|text| {
                let text = text.to_lowercase();
                values.iter().any(|v| v.to_lowercase() == text)
            }),
            ColumnFilter::Contains(needle) => cell
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(&needle.trim().to_lowercase())),
            ColumnFilter::NumberRange { from, to } => match cell {
                CellValue::Number(n) => {
                    from.map_or(true, |f| *n >= f) && to.map_or(true, |t| *n <= t)
                }
                _ => false,
            },
            ColumnFilter::DateRange { from, to } => match cell {
                CellValue::Date(d) => from.map_or(true, |f| *d >= f) && to.map_or(true, |t| *d <= t),
                _ => false,
            },
        }
    }

    /// Short text for the active-filter chip
    pub fn describe(&self) -> String {
        fn bound<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_else(|| "…".into())
        }
        match self {
            ColumnFilter::MultiSelect(values) => {
                values.iter().cloned().collect::<Vec<_>>().join(", ")
            }
            ColumnFilter::Contains(needle) => format!("contains \"{}\"", needle.trim()),
            ColumnFilter::NumberRange { from, to } => format!("{} – {}", bound(from), bound(to)),
            ColumnFilter::DateRange { from, to } => {
                let fmt = |d: &Option<NaiveDate>| {
                    bound(&d.map(|d| d.format("%d.%m.%Y").to_string()))
                };
                format!("{} – {}", fmt(from), fmt(to))
            }
        }
    }
}

/// Active filters keyed by column id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFilters {
    filters: BTreeMap<String, ColumnFilter>,
}

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the filter of `column`; an inactive filter removes it
    pub fn set(&mut self, column: &str, filter: ColumnFilter) {
        if filter.is_active() {
            self.filters.insert(column.to_string(), filter);
        } else {
            self.filters.remove(column);
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnFilter> {
        self.filters.get(column)
    }

    pub fn clear(&mut self, column: &str) {
        self.filters.remove(column);
    }

    pub fn active_count(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ColumnFilter)> {
        self.filters.iter()
    }

    pub fn matches<R: FilterableRow>(&self, row: &R) -> bool {
        self.filters
            .iter()
            .all(|(column, filter)| filter.matches(&row.cell(column)))
    }

    pub fn apply<R: FilterableRow + Clone>(&self, rows: &[R]) -> Vec<R> {
        rows.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

/// Sorted distinct non-empty values of a column, de-duplicated ignoring case
pub fn distinct_values<R: FilterableRow>(rows: &[R], column: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut values: Vec<String> = rows
        .iter()
        .filter_map(|r| r.cell(column).as_text())
        .filter(|v| seen.insert(v.to_lowercase()))
        .collect();
    values.sort_by(|a, b| natural_cmp(a, b));
    values
}

/// Case-insensitive comparison where digit runs compare by value,
/// so `SO-9` sorts before `SO-10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_run = take_digits(&mut left);
                let y_run = take_digits(&mut right);
                let ord = x_run
                    .len()
                    .cmp(&y_run.len())
                    .then_with(|| x_run.cmp(&y_run));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

/// Digit run with leading zeros stripped
fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    let trimmed = run.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Ascending order of two cells: dates chronologically, numbers
/// numerically, otherwise natural text order. Empty sorts after values.
pub fn dynamic_compare(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        (CellValue::Empty, _) => Ordering::Greater,
        (_, CellValue::Empty) => Ordering::Less,
        (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (x, y) => natural_cmp(
            &x.as_text().unwrap_or_default(),
            &y.as_text().unwrap_or_default(),
        ),
    }
}

/// Stable sort by one column. Empty cells stay last in both directions.
pub fn sort_rows<R: FilterableRow>(rows: &mut [R], column: &str, ascending: bool) {
    rows.sort_by(|a, b| {
        let (x, y) = (a.cell(column), b.cell(column));
        match (x.is_empty(), y.is_empty()) {
            (false, false) => {
                let ord = dynamic_compare(&x, &y);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            }
            _ => dynamic_compare(&x, &y),
        }
    });
}
