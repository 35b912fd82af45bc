//! Week-by-week forecast for a recurring event.

use chrono::Weekday;

use crate::model::{DailyForecast, ForecastPayload, weekday_name};
use crate::select::{select_day, week_pair_offsets};
use crate::summary::{DayOverview, HourlySeries, Summary, round_half_up};
use crate::window::{TimeWindow, hours_in_window};

/// What the user is planning: a weekday and a time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventQuery {
    pub weekday: Weekday,
    pub window: TimeWindow,
}

/// Forecast for one occurrence of the event.
#[derive(Clone, Debug)]
pub struct WeekForecast<'a> {
    /// 0-based occurrence index, `pair_offset + second_of_pair`.
    pub week: usize,
    pub day: &'a DailyForecast,
    pub series: HourlySeries,
    pub summary: Option<Summary>,
    pub description: Option<String>,
    pub overview: DayOverview,
}

impl<'a> WeekForecast<'a> {
    fn new(week: usize, day: &'a DailyForecast, window: TimeWindow) -> Self {
        let series = HourlySeries::from_hours(&hours_in_window(day, window));
        let summary = series.summary();
        let description = summary.as_ref().map(Summary::describe);
        WeekForecast {
            week,
            day,
            series,
            summary,
            description,
            overview: DayOverview::from_day(day),
        }
    }
}

/// Walk every two-week window of `payload`, first week then second.
pub fn build_report<'a>(payload: &'a ForecastPayload, query: &EventQuery) -> Vec<WeekForecast<'a>> {
    let mut weeks = Vec::new();
    for offset in week_pair_offsets(&payload.days, query.weekday) {
        for second in [false, true] {
            if let Some(day) = select_day(&payload.days, query.weekday, offset, second) {
                weeks.push(WeekForecast::new(offset + usize::from(second), day, query.window));
            }
        }
    }
    weeks
}

/// Render a Markdown table, one row per occurrence.
pub fn render_table(weeks: &[WeekForecast]) -> String {
    if weeks.is_empty() {
        return "_(no rows)_".into();
    }
    let mut s = String::from(
        "| Date | Temp (°F) | Precip (%) | Humidity (%) | Wind (mph) | Outlook |\n|---|---:|---:|---:|---:|---|\n",
    );
    for w in weeks {
        match (&w.summary, &w.description) {
            (Some(sum), Some(desc)) => s.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                w.day.date(),
                sum.avg_temp,
                sum.avg_precip,
                sum.avg_humidity,
                sum.avg_wind,
                desc
            )),
            _ => {
                let o = &w.overview;
                s.push_str(&format!(
                    "| {} | {} / {} | {} | {} | {} | {} _(whole day, no hourly data)_ |\n",
                    w.day.date(),
                    round_half_up(o.tempmin),
                    round_half_up(o.tempmax),
                    o.summary.avg_precip,
                    o.summary.avg_humidity,
                    o.summary.avg_wind,
                    o.summary.describe()
                ))
            }
        }
    }
    s
}

/// Plain-text report for the terminal.
pub fn render_text(query: &EventQuery, weeks: &[WeekForecast]) -> String {
    let mut s = format!(
        "Forecast for {} {}\n",
        weekday_name(query.weekday),
        query.window.name()
    );
    if weeks.is_empty() {
        s.push_str("  No matching days in the forecast.\n");
        return s;
    }
    for w in weeks {
        let pair = if w.week % 2 == 0 { "this week" } else { "next week" };
        s.push_str(&format!("\nWeek {} ({pair}) - {}\n", w.week + 1, w.day.date()));
        match (&w.summary, &w.description) {
            (Some(sum), Some(desc)) => {
                s.push_str(&format!(
                    "  {}°F, {}% precipitation, {}% humidity, {} mph wind\n  Expect {desc}\n",
                    sum.avg_temp, sum.avg_precip, sum.avg_humidity, sum.avg_wind
                ));
            }
            _ => {
                let day = &w.overview.summary;
                s.push_str(&format!(
                    "  No hourly data for this window. Whole day: {}% precipitation, {}% humidity, {} mph wind\n  Expect {}\n",
                    day.avg_precip,
                    day.avg_humidity,
                    day.avg_wind,
                    day.describe()
                ));
            }
        }
        let o = &w.overview;
        s.push_str(&format!(
            "  Day: {}°F / {}°F / {}°F (min/avg/max)",
            round_half_up(o.tempmin),
            o.summary.avg_temp,
            round_half_up(o.tempmax)
        ));
        if !o.conditions.is_empty() {
            s.push_str(&format!(", {}", o.conditions));
        }
        if !o.sunrise.is_empty() && !o.sunset.is_empty() {
            s.push_str(&format!(", sunrise {} sunset {}", o.sunrise, o.sunset));
        }
        s.push('\n');
    }
    s
}
