//! Company-day and timezone helpers (spec GLOSSARY: "Company day").
//!
//! Per spec §9 "Time sources", timezone resolution is consumed from an
//! external oracle — this module treats `chrono_tz::Tz` as a parameter, not
//! something it derives from GPS.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The calendar date of `instant` as observed in `tz` — the "company day".
pub fn company_day(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// The instant at which `wall_clock` occurs on `day` in `tz`.
///
/// Used to resolve a shift's wall-clock `start_time`/`end_time` into a
/// concrete instant for a specific company day (spec §4.2 step 5).
pub fn on_company_day(day: NaiveDate, wall_clock: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = day.and_time(wall_clock);
    tz.from_local_datetime(&naive)
        .single()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}

/// Minutes elapsed from `scheduled_start` to `actual`, floored, never negative.
pub fn minutes_late(scheduled_start: DateTime<Utc>, actual: DateTime<Utc>) -> i64 {
    let delta = actual - scheduled_start;
    let minutes = delta.num_seconds().div_euclid(60);
    minutes.max(0)
}

/// `Duration::minutes` wrapper kept local so callers don't need to import chrono directly.
pub fn minutes(n: i64) -> Duration {
    Duration::minutes(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate as ND;

    #[test]
    fn company_day_respects_timezone_not_utc() {
        // 2026-01-01 01:30 UTC is still 2025-12-31 evening in US/Central.
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 1, 30, 0).unwrap();
        let tz: Tz = "America/Chicago".parse().unwrap();
        assert_eq!(company_day(instant, tz), ND::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn minutes_late_floors_and_never_goes_negative() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 1, 1, 7, 59, 0).unwrap();
        assert_eq!(minutes_late(start, early), 0);

        let late = start + Duration::seconds(90);
        assert_eq!(minutes_late(start, late), 1);
    }
}
