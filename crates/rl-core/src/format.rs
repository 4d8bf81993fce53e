//! Display formatting for durations and paces.

use crate::parse::UNKNOWN_SENTINEL;

/// Rounds a non-negative quantity to whole units; negative and NaN become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

/// Formats minutes as `H:MM:SS`, or `MM:SS` under an hour.
pub fn format_duration(minutes: f64) -> String {
    let total = whole(minutes * 60.0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Formats seconds per mile as `M:SS`, or `--` when unknown.
pub fn format_pace(seconds: f64) -> String {
    let total = whole(seconds);
    if total == 0 {
        return UNKNOWN_SENTINEL.to_string();
    }
    format!("{}:{:02}", total / 60, total % 60)
}

/// Formats minutes as `Xd Yh Zm`, dropping leading zero units.
pub fn format_racing_time(minutes: f64) -> String {
    let total = whole(minutes);
    let (days, hours, mins) = (total / (24 * 60), (total % (24 * 60)) / 60, total % 60);
    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_under_an_hour() {
        assert_eq!(format_duration(45.5), "45:30");
        assert_eq!(format_duration(5.0), "05:00");
    }

    #[test]
    fn duration_with_hours() {
        assert_eq!(format_duration(62.5), "1:02:30");
        assert_eq!(format_duration(225.0), "3:45:00");
    }

    #[test]
    fn duration_rounding_carries_into_minutes() {
        // 20.9999 minutes is 1259.994 seconds
        assert_eq!(format_duration(20.9999), "21:00");
    }

    #[test]
    fn duration_zero_and_negative() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(-3.0), "00:00");
    }

    #[test]
    fn pace() {
        assert_eq!(format_pace(495.0), "8:15");
        assert_eq!(format_pace(360.0), "6:00");
        assert_eq!(format_pace(0.0), "--");
        assert_eq!(format_pace(f64::NAN), "--");
    }

    #[test]
    fn racing_time() {
        assert_eq!(format_racing_time(45.0), "45m");
        assert_eq!(format_racing_time(125.0), "2h 5m");
        assert_eq!(format_racing_time(3000.0), "2d 2h 0m");
    }
}
