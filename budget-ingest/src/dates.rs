//! Locale-independent date parsing for ledger cells.
//!
//! Formats are tried in order; slash dates are month-first. Month names match
//! in English only, short or long, any case.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%B %d %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date cell. Returns `None` for empty or unrecognised text.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Year-first formats need a four digit year up front, otherwise "1/5/24"
    // would read as year 1.
    let year_first = s.bytes().take_while(u8::is_ascii_digit).count() >= 4;

    for fmt in DATE_FORMATS {
        if fmt.starts_with("%Y") && !year_first {
            continue;
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    for fmt in DATETIME_FORMATS {
        if fmt.starts_with("%Y") && !year_first {
            continue;
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // Offset-carrying timestamps keep their local calendar date
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_and_separators() {
        assert_eq!(parse_date("2024-01-05"), ymd(2024, 1, 5));
        assert_eq!(parse_date(" 2024/01/05 "), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024.01.05"), ymd(2024, 1, 5));
        assert_eq!(parse_date("20240105"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_slash_dates_are_month_first() {
        assert_eq!(parse_date("01/05/2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("1/5/24"), ymd(2024, 1, 5));
        assert_eq!(parse_date("12-31-2023"), ymd(2023, 12, 31));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_date("5 Jan 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("05-jan-2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("January 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("Feb 29 2024"), ymd(2024, 2, 29));
    }

    #[test]
    fn test_full_month_names() {
        assert_eq!(parse_date("January 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("September 30 2023"), ymd(2023, 9, 30));
        assert_eq!(parse_date("5 March 2024"), ymd(2024, 3, 5));
        assert_eq!(parse_date("05-december-2024"), ymd(2024, 12, 5));
        assert_eq!(parse_date("Janu 5, 2024"), None);
    }

    #[test]
    fn test_datetimes_keep_date_part() {
        assert_eq!(parse_date("2024-01-05 13:45:00"), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05T13:45:00"), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05 13:45"), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05T23:30:00+02:00"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_invalid_cells() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("13/01/2024"), None);
    }
}
