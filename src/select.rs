//! Picking the event day out of a multi-week payload.
//!
//! Forecasts are browsed two weeks at a time. A pair offset (0, 2, 4, ...)
//! addresses a two-week window and a flag picks the first or second week
//! inside it. Both index into the date-sorted list of days that fall on the
//! requested weekday.

use chrono::Weekday;

use crate::model::{DailyForecast, ForecastPayload};

/// Days falling on `weekday`, oldest first.
pub fn matching_days(days: &[DailyForecast], weekday: Weekday) -> Vec<&DailyForecast> {
    let mut matches: Vec<&DailyForecast> = days.iter().filter(|d| d.weekday() == weekday).collect();
    matches.sort_by_key(|d| d.date());
    matches
}

/// The `pair_offset + (use_second_of_pair as usize)`-th occurrence of `weekday`.
///
/// Returns `None` when the payload has no such occurrence.
pub fn select_day(
    days: &[DailyForecast],
    weekday: Weekday,
    pair_offset: usize,
    use_second_of_pair: bool,
) -> Option<&DailyForecast> {
    let index = pair_offset + usize::from(use_second_of_pair);
    matching_days(days, weekday).get(index).copied()
}

/// Pair offsets that address at least one occurrence of `weekday`.
pub fn week_pair_offsets(days: &[DailyForecast], weekday: Weekday) -> Vec<usize> {
    let count = matching_days(days, weekday).len();
    (0..count).step_by(2).collect()
}

impl ForecastPayload {
    pub fn select_day(&self, weekday: Weekday, pair_offset: usize, use_second_of_pair: bool) -> Option<&DailyForecast> {
        select_day(&self.days, weekday, pair_offset, use_second_of_pair)
    }
}
