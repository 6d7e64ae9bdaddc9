use chrono::{DateTime, FixedOffset};

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name for a weekday index counted from Sunday = 0.
pub fn weekday_name(day: u32) -> Option<&'static str> {
    WEEKDAYS.get(day as usize).copied()
}

pub fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// `Tuesday, February 11, 2025`
pub fn format_long_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%A, %B %-d, %Y").to_string()
}

/// `3:30 PM`
pub fn format_short_time(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Truncate a string to `max` chars with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_datetime;

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(0), Some("Sunday"));
        assert_eq!(weekday_name(6), Some("Saturday"));
        assert_eq!(weekday_name(7), None);
    }

    #[test]
    fn tooltip_formats() {
        let dt = parse_datetime("2025-02-11T15:05:00-08:00", "").unwrap();
        assert_eq!(format_long_date(&dt), "Tuesday, February 11, 2025");
        assert_eq!(format_short_time(&dt), "3:05 PM");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.8), "80.0%");
        assert_eq!(format_percent(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("ééééééé", 5), "éé...");
    }
}
