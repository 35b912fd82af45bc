//! EventCast
//!
//! Core library for planning a recurring outdoor event: fetch a multi-week
//! forecast, pick the event day in each week, slice it to a time of day and
//! summarize it as averages, a one-line outlook and charts.
//!
//! See README for usage. The binary crate calls `run_forecast` and
//! `notes::run_notes`.

pub mod chart;
pub mod config;
pub mod model;
pub mod notes;
pub mod provider;
pub mod report;
pub mod select;
pub mod summary;
pub mod window;

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::{fs, path::Path};
use tracing::info;

pub use config::{Config, ProviderKind};
pub use model::{DailyForecast, ForecastPayload, HourlyForecast, parse_weekday, weekday_name};
pub use notes::{EventNote, extract_event_meta, upsert_forecast_block};
pub use provider::{ForecastProvider, MockProvider, VisualCrossingProvider, provider_from_config};
pub use report::{EventQuery, WeekForecast, build_report, render_table, render_text};
pub use select::{matching_days, select_day, week_pair_offsets};
pub use summary::{DayOverview, HourlySeries, Summary, describe, round_half_up, summarize};
pub use window::{TimeWindow, hours_in_window};

/// Inclusive fetch range starting at `today`, `horizon_days` clamped to
/// `1..=MAX_HORIZON_DAYS`.
pub fn fetch_range(today: NaiveDate, horizon_days: i64) -> (NaiveDate, NaiveDate) {
    let days = horizon_days.clamp(1, config::MAX_HORIZON_DAYS);
    (today, today + Duration::days(days - 1))
}

/// Fetch the forecast for `location`, print the weekly report and, when
/// `config.chart_dir` is set, write one PNG chart per event day.
pub async fn run_forecast(
    provider: &dyn ForecastProvider,
    config: &Config,
    location: &str,
    query: &EventQuery,
) -> Result<()> {
    let (start, end) = fetch_range(Local::now().date_naive(), config.horizon_days);
    info!(location, provider = provider.name(), %start, %end, "fetching forecast");
    let payload = provider.forecast(location, start, end).await?;

    let weeks = build_report(&payload, query);
    if let Some(addr) = &payload.resolved_address {
        println!("{addr}");
    }
    print!("{}", render_text(query, &weeks));

    if let Some(dir) = &config.chart_dir {
        let dir = Path::new(dir);
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        for week in &weeks {
            let path = dir.join(format!(
                "{}-{}-{}.png",
                week.day.date(),
                weekday_name(query.weekday),
                query.window.name()
            ));
            chart::render_week_chart(week, &path)?;
            println!("Chart written: {}", path.display());
        }
    }
    Ok(())
}
