//! Calendar-day helpers shared by habits and task projections.
//!
//! # Invariants
//! - A day-key is always `YYYY-MM-DD`, zero padded.
//! - The same local day maps to the same key regardless of time-of-day.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// `chrono` format string for canonical day-keys.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats one calendar day as its canonical key.
pub fn day_key(day: NaiveDate) -> String {
    day.format(DAY_KEY_FORMAT).to_string()
}

/// Parses a canonical day-key. Returns `None` for anything else.
pub fn parse_day_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_KEY_FORMAT).ok()
}

/// Calendar day of `instant` as observed in time zone `tz`.
pub fn local_day<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::{day_key, local_day, parse_day_key};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn day_key_is_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(day_key(day), "2024-03-07");
        assert_eq!(parse_day_key("2024-03-07"), Some(day));
    }

    #[test]
    fn parse_day_key_rejects_other_shapes() {
        assert_eq!(parse_day_key("07/03/2024"), None);
        assert_eq!(parse_day_key("2024-13-01"), None);
        assert_eq!(parse_day_key(""), None);
    }

    #[test]
    fn local_day_uses_observer_time_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 23, 30, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            local_day(&instant, &Utc),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
        assert_eq!(
            local_day(&instant, &tokyo),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
    }
}
