use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::aggregate::Granularity;
use crate::domain::entities::record::TransformedRecord;

/// Sort position for month names outside the calendar list.
pub const UNKNOWN_MONTH_INDEX: usize = 999;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("float prefix pattern is valid")
});
static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("int prefix pattern is valid"));

/// Parses a measure cell: thousands separators are stripped and the longest
/// leading number is taken. Anything unparseable counts as zero.
pub fn parse_impression(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    FLOAT_PREFIX
        .find(cleaned.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Leading integer of a year cell, or zero.
pub fn parse_year(text: &str) -> i64 {
    INT_PREFIX
        .find(text.trim_start())
        .and_then(|found| found.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Zero-based calendar position of an English month name.
pub fn month_index(name: &str) -> Option<usize> {
    (1..=12u8)
        .filter_map(|number| Month::try_from(number).ok())
        .position(|month| month.name() == name)
}

pub fn month_sort_key(name: &str) -> usize {
    month_index(name).unwrap_or(UNKNOWN_MONTH_INDEX)
}

pub fn period_key(record: &TransformedRecord, granularity: Granularity) -> &str {
    match granularity {
        Granularity::Month => &record.month,
        Granularity::Year => &record.year,
    }
}

/// Calendar order for months, ascending numeric order for years. Labels
/// that do not parse go last and keep their first-seen order.
pub fn sort_periods(periods: &mut [String], granularity: Granularity) {
    match granularity {
        Granularity::Month => periods.sort_by_key(|period| month_sort_key(period)),
        Granularity::Year => periods.sort_by_key(|period| match period.trim().parse::<i64>() {
            Ok(year) => (0, year),
            Err(_) => (1, 0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impression_parse_strips_separators_and_trailing_text() {
        assert_eq!(parse_impression("1,234,567"), 1_234_567.0);
        assert_eq!(parse_impression(" 12.5k"), 12.5);
        assert_eq!(parse_impression("-"), 0.0);
        assert_eq!(parse_impression("n/a"), 0.0);
        assert_eq!(parse_impression(""), 0.0);
    }

    #[test]
    fn year_parse_takes_leading_digits() {
        assert_eq!(parse_year("2024"), 2024);
        assert_eq!(parse_year("2023 (est)"), 2023);
        assert_eq!(parse_year("FY24"), 0);
    }

    #[test]
    fn month_names_follow_calendar() {
        assert_eq!(month_index("January"), Some(0));
        assert_eq!(month_index("December"), Some(11));
        assert_eq!(month_index("Jan"), None);
        assert_eq!(month_sort_key("Sept"), UNKNOWN_MONTH_INDEX);
    }

    #[test]
    fn periods_sort_by_calendar_or_year() {
        let mut months = vec![
            "March".to_string(),
            "Q1".to_string(),
            "January".to_string(),
        ];
        sort_periods(&mut months, Granularity::Month);
        assert_eq!(months, vec!["January", "March", "Q1"]);

        let mut years = vec!["2024".to_string(), "n/a".to_string(), "2022".to_string()];
        sort_periods(&mut years, Granularity::Year);
        assert_eq!(years, vec!["2022", "2024", "n/a"]);
    }
}
