/// Utilities for date formatting and date range presets
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Value of an `<input type="date">`
pub fn to_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn from_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Local calendar date of the browser
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Quick choices of the date column filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreset {
    #[default]
    All,
    Today,
    Yesterday,
    PastWeek,
    PastMonth,
    PastSixMonths,
    PastYear,
    Custom,
}

impl DatePreset {
    pub const ALL: [DatePreset; 8] = [
        DatePreset::All,
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::PastWeek,
        DatePreset::PastMonth,
        DatePreset::PastSixMonths,
        DatePreset::PastYear,
        DatePreset::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DatePreset::All => "all",
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::PastWeek => "past_week",
            DatePreset::PastMonth => "past_month",
            DatePreset::PastSixMonths => "past_6_months",
            DatePreset::PastYear => "past_year",
            DatePreset::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::All => "All",
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::PastWeek => "Past Week",
            DatePreset::PastMonth => "Past Month",
            DatePreset::PastSixMonths => "Past 6 Months",
            DatePreset::PastYear => "Past Year",
            DatePreset::Custom => "Custom Range",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == key)
            .unwrap_or_default()
    }

    /// Inclusive range relative to `today`. `All` has none; `Custom` uses
    /// the given bounds and needs both of them.
    pub fn range(
        &self,
        today: NaiveDate,
        custom: (Option<NaiveDate>, Option<NaiveDate>),
    ) -> Option<(NaiveDate, NaiveDate)> {
        let first_of_month = today.with_day(1)?;
        match self {
            DatePreset::All => None,
            DatePreset::Today => Some((today, today)),
            DatePreset::Yesterday => {
                let day = today - Duration::days(1);
                Some((day, day))
            }
            DatePreset::PastWeek => {
                // Monday to Sunday of the previous week
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                Some((monday - Duration::days(7), monday - Duration::days(1)))
            }
            DatePreset::PastMonth => Some((
                first_of_month.checked_sub_months(Months::new(1))?,
                first_of_month - Duration::days(1),
            )),
            DatePreset::PastSixMonths => Some((
                first_of_month.checked_sub_months(Months::new(6))?,
                first_of_month - Duration::days(1),
            )),
            DatePreset::PastYear => Some((
                NaiveDate::from_ymd_opt(today.year() - 1, 1, 1)?,
                NaiveDate::from_ymd_opt(today.year() - 1, 12, 31)?,
            )),
            DatePreset::Custom => match custom {
                (Some(from), Some(to)) if from <= to => Some((from, to)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_input_value() {
        assert_eq!(to_input_value(d(2024, 1, 5)), "2024-01-05");
        assert_eq!(from_input_value("2024-01-05"), Some(d(2024, 1, 5)));
        assert_eq!(from_input_value(""), None);
    }

    #[test]
    fn test_simple_presets() {
        let today = d(2024, 3, 1);
        let none = (None, None);
        assert_eq!(DatePreset::All.range(today, none), None);
        assert_eq!(DatePreset::Today.range(today, none), Some((today, today)));
        assert_eq!(
            DatePreset::Yesterday.range(today, none),
            Some((d(2024, 2, 29), d(2024, 2, 29)))
        );
    }

    #[test]
    fn test_past_week_is_previous_monday_to_sunday() {
        // Wednesday
        let today = d(2024, 1, 17);
        assert_eq!(
            DatePreset::PastWeek.range(today, (None, None)),
            Some((d(2024, 1, 8), d(2024, 1, 14)))
        );
        // a Monday still looks at the week before
        assert_eq!(
            DatePreset::PastWeek.range(d(2024, 1, 15), (None, None)),
            Some((d(2024, 1, 8), d(2024, 1, 14)))
        );
    }

    #[test]
    fn test_month_presets() {
        let today = d(2024, 1, 20);
        assert_eq!(
            DatePreset::PastMonth.range(today, (None, None)),
            Some((d(2023, 12, 1), d(2023, 12, 31)))
        );
        assert_eq!(
            DatePreset::PastSixMonths.range(today, (None, None)),
            Some((d(2023, 7, 1), d(2023, 12, 31)))
        );
        assert_eq!(
            DatePreset::PastYear.range(today, (None, None)),
            Some((d(2023, 1, 1), d(2023, 12, 31)))
        );
    }

    #[test]
    fn test_custom_needs_both_bounds() {
        let today = d(2024, 1, 20);
        assert_eq!(DatePreset::Custom.range(today, (Some(d(2024, 1, 1)), None)), None);
        assert_eq!(
            DatePreset::Custom.range(today, (Some(d(2024, 1, 1)), Some(d(2024, 1, 2)))),
            Some((d(2024, 1, 1), d(2024, 1, 2)))
        );
    }

    #[test]
    fn test_preset_keys_round_trip() {
        for preset in DatePreset::ALL {
            assert_eq!(DatePreset::from_key(preset.key()), preset);
        }
        assert_eq!(DatePreset::from_key("nonsense"), DatePreset::All);
    }
}
