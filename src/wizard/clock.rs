//! Wall-clock arithmetic for the bedtime questions.
//!
//! Everything works on time-of-day only; dates never enter the picture, so a
//! bedtime earlier than "now" always means tomorrow.

use chrono::{Duration, Local, NaiveTime, Timelike};

use crate::models::selection::MIN_DURATION_MINUTES;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Watch window offered before a bedtime is known
pub const DEFAULT_AVAILABLE_MINUTES: u32 = 120;

/// Source of the current time of day
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveTime;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Clock pinned to one time of day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Drops seconds and sub-seconds
fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Minute of day, counting a partly elapsed minute as over. May be 1440.
fn minute_of_day_ceil(time: NaiveTime) -> i64 {
    let partial = time.second() > 0 || time.nanosecond() > 0;
    minute_of_day(time) + i64::from(partial)
}

/// Whole minutes from `now` until `bedtime`, never less than 30.
///
/// A bedtime that already passed today rolls over to tomorrow. A partly
/// elapsed minute is not counted, so the window is never overstated and
/// repeated calls within one minute agree.
pub fn available_minutes(now: NaiveTime, bedtime: NaiveTime) -> u32 {
    let mut diff = minute_of_day(bedtime) - minute_of_day_ceil(now);
    if diff < 0 {
        diff += MINUTES_PER_DAY;
    }
    let floor = i64::from(MIN_DURATION_MINUTES);
    // diff is within 0..1440 here
    diff.max(floor) as u32
}

/// Time of day at which something started at `now` and lasting `runtime`
/// minutes ends. Wraps past midnight.
pub fn bedtime_projection(now: NaiveTime, runtime_minutes: u32) -> NaiveTime {
    truncate_to_minute(now) + Duration::minutes(i64::from(runtime_minutes))
}

/// Bedtime pre-filled in the picker: one hour from now
pub fn suggested_bedtime(now: NaiveTime) -> NaiveTime {
    truncate_to_minute(now) + Duration::hours(1)
}

/// `HH:MM`, zero padded
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parses `HH:MM` as produced by a time input
pub fn parse_hhmm(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}
