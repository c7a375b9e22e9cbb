use lazy_static::lazy_static;
use regex::Regex;
use time::{format_description::FormatItem, macros::format_description, Date, Duration};

use crate::error::ApiError;

pub const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

// serde helpers for `YYYY-MM-DD` date fields
time::serde::format_description!(pub day, Date, "[year]-[month]-[day]");

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parse a `YYYY-MM-DD` path parameter. The regex gate catches malformed
/// strings; the calendar parse then rejects format-valid but impossible
/// dates such as `2024-02-30`.
pub fn parse_day(raw: &str) -> Result<Date, ApiError> {
    if !DATE_RE.is_match(raw) {
        return Err(ApiError::validation(format!(
            "invalid date '{raw}', expected YYYY-MM-DD"
        )));
    }
    Date::parse(raw, DAY_FORMAT)
        .map_err(|_| ApiError::validation(format!("'{raw}' is not a calendar date")))
}

pub fn format_day(date: Date) -> String {
    // The format description only contains infallible components.
    date.format(DAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Seven consecutive days ending at `end`, oldest first.
pub fn week_dates(end: Date) -> [Date; 7] {
    std::array::from_fn(|i| end - Duration::days((6 - i) as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_valid_day() {
        assert_eq!(parse_day("2024-02-29").unwrap(), date!(2024 - 02 - 29));
    }

    #[test]
    fn rejects_malformed_strings() {
        for raw in ["2024/02/01", "20240201", "2024-2-1", "yesterday", ""] {
            let err = parse_day(raw).unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::Validation, "{raw}");
        }
    }

    #[test]
    fn rejects_calendar_invalid_dates() {
        // Format-valid, calendar-invalid: must not be normalized.
        for raw in ["2024-02-30", "2023-02-29", "2024-13-01", "2024-04-31"] {
            let err = parse_day(raw).unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::Validation, "{raw}");
        }
    }

    #[test]
    fn week_dates_are_ascending_and_end_at_given_day() {
        let days = week_dates(date!(2024 - 03 - 05));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date!(2024 - 02 - 28));
        assert_eq!(days[6], date!(2024 - 03 - 05));
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn format_day_round_trips() {
        let day = date!(2024 - 01 - 07);
        assert_eq!(format_day(day), "2024-01-07");
        assert_eq!(parse_day(&format_day(day)).unwrap(), day);
    }
}
