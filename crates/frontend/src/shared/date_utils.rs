/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, TimeZone, Utc};

/// Format a UTC timestamp as DD.MM.YYYY HH:MM:SS
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Format unix seconds as DD.MM.YYYY HH:MM:SS, "-" when out of range
pub fn format_unix(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(dt) => format_datetime(&dt),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&dt), "15.03.2024 14:02:26");
    }

    #[test]
    fn test_format_unix() {
        assert_eq!(format_unix(0), "01.01.1970 00:00:00");
        assert_eq!(format_unix(i64::MAX), "-");
    }
}
