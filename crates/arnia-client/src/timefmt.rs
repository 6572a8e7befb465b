//! Timestamp formats required by the backend form fields.
//!
//! Four renderings of the same capture instant: a colon-free ISO-8601 UTC
//! string, the local date, the local 24-hour time, and the Italian long-form
//! note. Locale-aware formatting is deliberately avoided; the month names
//! come from an explicit table so the output is stable on any device.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::fmt;

const ITALIAN_MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// ISO-8601 UTC with every `:` in the time portion replaced by `-`,
/// e.g. `2026-08-26T14-05-09Z`.
pub fn format_timestamp_utc<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
        .replace(':', "-")
}

/// Local wall-clock date, `YYYY-MM-DD`.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format("%Y-%m-%d").to_string()
}

/// Local wall-clock time, `HH:MM`, 24-hour.
pub fn format_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format("%H:%M").to_string()
}

/// Italian long-form note value: `Foto scattata il 26 agosto 2026 alle 14:05`.
pub fn format_note<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let month = ITALIAN_MONTHS[dt.month0() as usize];
    format!(
        "Foto scattata il {:02} {} {} alle {:02}:{:02}",
        dt.day(),
        month,
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_instant() -> DateTime<FixedOffset> {
        // 2026-08-26 14:05:09 +02:00 (12:05:09 UTC)
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 26, 14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_timestamp_utc_has_no_colons() {
        let ts = format_timestamp_utc(&fixed_instant());
        assert_eq!(ts, "2026-08-26T12-05-09Z");
        assert!(!ts.contains(':'));
    }

    #[test]
    fn test_date_and_time_use_local_wall_clock() {
        let dt = fixed_instant();
        assert_eq!(format_date(&dt), "2026-08-26");
        assert_eq!(format_time(&dt), "14:05");
    }

    #[test]
    fn test_note_uses_italian_month_table() {
        let dt = fixed_instant();
        assert_eq!(
            format_note(&dt),
            "Foto scattata il 26 agosto 2026 alle 14:05"
        );

        let january = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 3, 7, 4, 0)
            .unwrap();
        assert_eq!(
            format_note(&january),
            "Foto scattata il 03 gennaio 2026 alle 07:04"
        );
    }
}
