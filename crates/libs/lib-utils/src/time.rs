//! # Time Utilities
//!
//! Utilities for time formatting using chrono.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format time as an RFC3339 string with second precision.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();
        assert_eq!(format_time(time), "2024-09-01T08:30:00Z");
    }
}
