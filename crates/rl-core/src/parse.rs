//! Parsing primitives for the free-text fields of a race record.
//!
//! Every function here is total: malformed input degrades to `0` (or `None`
//! for dates) instead of failing.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Placeholder the record source uses for an unknown time or pace.
pub const UNKNOWN_SENTINEL: &str = "--";

/// Date layouts accepted by [`parse_date`], tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%A, %B %d, %Y",
    "%A %B %d %Y",
    "%m/%d/%y",
    "%m-%d-%y",
];

/// Timestamp layouts accepted by [`parse_date`]; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Earliest year accepted from a parsed date.
///
/// `%Y` also accepts one to three digit years, which would read `10/9/16` as
/// the year 10.
const MIN_YEAR: i32 = 1000;

/// Splits `text` into non-negative numeric `:`-separated parts.
///
/// An empty part counts as 0, so `"12:"` is twelve minutes. Returns `None` for
/// the empty string, the unknown sentinel, or any part that is not a finite,
/// non-negative number.
fn numeric_parts(text: &str) -> Option<Vec<f64>> {
    let text = text.trim();
    if text.is_empty() || text == UNKNOWN_SENTINEL {
        return None;
    }

    text.split(':')
        .map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return Some(0.0);
            }
            part.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 0.0)
        })
        .collect()
}

/// Parses a finish time (`"H:MM:SS"` or `"MM:SS"`) into minutes, rounded to
/// two decimal places.
///
/// Returns `0.0` when the time is unknown or malformed.
pub fn parse_duration(text: &str) -> f64 {
    let minutes = match numeric_parts(text).as_deref() {
        Some(&[hours, minutes, seconds]) => hours * 60.0 + minutes + seconds / 60.0,
        Some(&[minutes, seconds]) => minutes + seconds / 60.0,
        _ => 0.0,
    };
    (minutes * 100.0).round() / 100.0
}

/// Parses a pace (`"MM:SS"`) into seconds per mile.
///
/// Returns `0.0` when the pace is unknown or malformed.
pub fn parse_pace(text: &str) -> f64 {
    match numeric_parts(text).as_deref() {
        Some(&[minutes, seconds]) => minutes * 60.0 + seconds,
        _ => 0.0,
    }
}

/// Rewrites month abbreviations chrono doesn't know: `Sept` and a trailing
/// period as in `Oct.`.
fn month_words(text: &str) -> Cow<'_, str> {
    let needs_rewrite = text.split_whitespace().any(|word| {
        word.eq_ignore_ascii_case("sept") || word.ends_with('.')
    });
    if !needs_rewrite {
        return Cow::Borrowed(text);
    }

    let words: Vec<&str> = text
        .split_whitespace()
        .map(|word| {
            let bare = word.strip_suffix('.').unwrap_or(word);
            if bare.eq_ignore_ascii_case("sept") {
                "Sep"
            } else if bare.chars().all(char::is_alphabetic) {
                bare
            } else {
                word
            }
        })
        .collect();
    Cow::Owned(words.join(" "))
}

/// Best-effort parse of a human-readable race date.
///
/// Accepts ISO dates, RFC 3339 and plain timestamps, US numeric dates with
/// two or four digit years, and spelled-out month names (full or abbreviated,
/// optionally preceded by a weekday). Returns `None` when nothing matches or
/// the year is implausibly early.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let plausible = |date: &NaiveDate| date.year() >= MIN_YEAR;

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive()).filter(plausible);
    }
    if let Some(date) = DATETIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(text, format)
            .ok()
            .map(|dt| dt.date())
            .filter(plausible)
    }) {
        return Some(date);
    }

    let text = month_words(text);
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(&text, format)
            .ok()
            .filter(plausible)
    })
}

#[cfg(test)]
#[expect(clippy::float_cmp, reason = "parsed values are exact")]
mod tests {
    use super::*;

    #[test]
    fn duration_with_hours() {
        assert_eq!(parse_duration("1:02:30"), 62.5);
        assert_eq!(parse_duration("3:45:00"), 225.0);
    }

    #[test]
    fn duration_minutes_seconds() {
        assert_eq!(parse_duration("45:30"), 45.5);
        assert_eq!(parse_duration("28:00"), 28.0);
    }

    #[test]
    fn duration_rounds_to_two_places() {
        // 20 + 10/60 = 20.1666...
        assert_eq!(parse_duration("20:10"), 20.17);
        // 1:00:01 = 60.01666...
        assert_eq!(parse_duration("1:00:01"), 60.02);
    }

    #[test]
    fn duration_unknown_is_zero() {
        assert_eq!(parse_duration(""), 0.0);
        assert_eq!(parse_duration("--"), 0.0);
        assert_eq!(parse_duration("   "), 0.0);
    }

    #[test]
    fn duration_malformed_is_zero() {
        assert_eq!(parse_duration("45"), 0.0);
        assert_eq!(parse_duration("1:02:03:04"), 0.0);
        assert_eq!(parse_duration("abc:12"), 0.0);
        assert_eq!(parse_duration("-5:00"), 0.0);
        assert_eq!(parse_duration("NaN:00"), 0.0);
        assert_eq!(parse_duration("inf:00"), 0.0);
    }

    #[test]
    fn duration_empty_part_counts_as_zero() {
        assert_eq!(parse_duration("12:"), 12.0);
        assert_eq!(parse_duration("1::30"), 60.5);
        assert_eq!(parse_duration(":30"), 0.5);
    }

    #[test]
    fn duration_tolerates_surrounding_whitespace() {
        assert_eq!(parse_duration(" 45:30 "), 45.5);
    }

    #[test]
    fn pace_minutes_seconds() {
        assert_eq!(parse_pace("8:15"), 495.0);
        assert_eq!(parse_pace("6:00"), 360.0);
    }

    #[test]
    fn pace_unknown_or_malformed_is_zero() {
        assert_eq!(parse_pace("--"), 0.0);
        assert_eq!(parse_pace(""), 0.0);
        assert_eq!(parse_pace("1:08:15"), 0.0);
        assert_eq!(parse_pace("fast"), 0.0);
    }

    #[test]
    fn date_iso_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2023, 10, 15);
        assert_eq!(parse_date("2023-10-15"), expected);
        assert_eq!(parse_date("2023-10-15T08:00:00Z"), expected);
        assert_eq!(parse_date("2023-10-15T08:00:00"), expected);
        assert_eq!(parse_date("2023-10-15 08:00:00"), expected);
        assert_eq!(parse_date("2023-10-15 08:00"), expected);
    }

    #[test]
    fn date_spelled_out_months() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 5);
        assert_eq!(parse_date("March 5, 2019"), expected);
        assert_eq!(parse_date("Mar 5, 2019"), expected);
        assert_eq!(parse_date("5 March 2019"), expected);
        assert_eq!(parse_date("Tue Mar 5 2019"), expected);
        assert_eq!(parse_date("Tuesday, March 5, 2019"), expected);
    }

    #[test]
    fn date_month_abbreviation_variants() {
        assert_eq!(parse_date("Sept 18, 2022"), NaiveDate::from_ymd_opt(2022, 9, 18));
        assert_eq!(parse_date("sept. 18, 2022"), NaiveDate::from_ymd_opt(2022, 9, 18));
        assert_eq!(parse_date("Oct. 9, 2016"), NaiveDate::from_ymd_opt(2016, 10, 9));
    }

    #[test]
    fn date_two_digit_year_is_not_an_ancient_year() {
        assert_eq!(parse_date("10/9/16"), NaiveDate::from_ymd_opt(2016, 10, 9));
        assert_eq!(parse_date("4-2-16"), NaiveDate::from_ymd_opt(2016, 4, 2));
        assert_eq!(parse_date("0010-09-16"), None);
        assert_eq!(parse_date("10/9/0016"), None);
    }

    #[test]
    fn date_us_numeric() {
        assert_eq!(parse_date("11/24/2016"), NaiveDate::from_ymd_opt(2016, 11, 24));
        assert_eq!(parse_date("4/2/2016"), NaiveDate::from_ymd_opt(2016, 4, 2));
    }

    #[test]
    fn date_invalid_is_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("sometime in spring"), None);
        assert_eq!(parse_date("2023-02-30"), None);
    }
}
