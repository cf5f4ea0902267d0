//! Annual trigger computation.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use typedex_core::config::ScheduleConfig;

use crate::error::RunnerError;

/// Years searched ahead; covers a Feb 29 schedule across a century gap.
const SEARCH_YEARS: i32 = 8;

/// The first configured instant strictly after `now`.
pub fn next_run_after(
    now: DateTime<Utc>,
    schedule: &ScheduleConfig,
) -> Result<DateTime<Utc>, RunnerError> {
    (0..=SEARCH_YEARS)
        .filter_map(|offset| now.year().checked_add(offset))
        .filter_map(|year| {
            Utc.with_ymd_and_hms(
                year,
                schedule.month,
                schedule.day,
                schedule.hour,
                schedule.minute,
                0,
            )
            .single()
        })
        .find(|candidate| *candidate > now)
        .ok_or(RunnerError::Schedule {
            month: schedule.month,
            day: schedule.day,
        })
}
