//! Forecast sources. The CLI picks one from `Config`; tests use the mock.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};
use serde::de::DeserializeOwned;
use std::f64::consts::PI;
use tracing::{debug, info};

use crate::config::{Config, ProviderKind};
use crate::model::{DailyForecast, ForecastPayload, HourlyForecast};

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Daily (and hourly) forecast for `location`, `start..=end`.
    async fn forecast(&self, location: &str, start: NaiveDate, end: NaiveDate) -> Result<ForecastPayload>;

    fn name(&self) -> &'static str;
}

/// Build the provider selected by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>> {
    match config.provider {
        ProviderKind::Mock => Ok(Box::new(MockProvider)),
        ProviderKind::VisualCrossing => {
            let key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .context("VISUAL_CROSSING_API_KEY is not set")?;
            Ok(Box::new(VisualCrossingProvider::new(key, config.base_url.clone())?))
        }
    }
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str, query: &[(&str, &str)]) -> Result<T> {
    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("network error: {url}"))?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "could not read error body".to_string());
        bail!("request failed: {url} ({status}): {}", body.trim());
    }
    resp.json::<T>()
        .await
        .with_context(|| format!("failed to parse JSON from {url}"))
}

/// Visual Crossing timeline API, US units.
pub struct VisualCrossingProvider {
    client: reqwest::Client,
    api_key: String,
    base: String,
}

impl VisualCrossingProvider {
    pub fn new(api_key: String, base: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("eventcast/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, api_key, base })
    }

    /// Request URL, without the query string.
    pub fn url(&self, location: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base.trim_end_matches('/'),
            urlencoding::encode(location.trim()),
            start,
            end
        )
    }
}

#[async_trait]
impl ForecastProvider for VisualCrossingProvider {
    async fn forecast(&self, location: &str, start: NaiveDate, end: NaiveDate) -> Result<ForecastPayload> {
        let url = self.url(location, start, end);
        debug!(%url, "fetching forecast");
        let query = [
            ("key", self.api_key.as_str()),
            ("unitGroup", "us"),
            ("include", "days,hours,current,alerts"),
            ("contentType", "json"),
        ];
        let payload: ForecastPayload = get_json(&self.client, &url, &query).await?;
        info!(
            location,
            resolved = payload.resolved_address.as_deref().unwrap_or(location),
            days = payload.days.len(),
            "forecast received"
        );
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "visual-crossing"
    }
}

/// Deterministic synthetic forecast for offline use.
///
/// Rain falls on days of the month divisible by 7, partly cloudy on those
/// divisible by 3, clear otherwise. Every day carries 24 hourly records.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn generate(start: NaiveDate, end: NaiveDate) -> ForecastPayload {
        let mut days = Vec::new();
        let mut date = start;
        while date <= end {
            days.push(mock_day(date));
            date += Duration::days(1);
        }
        ForecastPayload {
            resolved_address: Some("Mock City".to_string()),
            days,
        }
    }
}

#[async_trait]
impl ForecastProvider for MockProvider {
    async fn forecast(&self, location: &str, start: NaiveDate, end: NaiveDate) -> Result<ForecastPayload> {
        if end < start {
            bail!("end date {end} is before start date {start}");
        }
        debug!(location, %start, %end, "generating mock forecast");
        Ok(MockProvider::generate(start, end))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn mock_day(date: NaiveDate) -> DailyForecast {
    let summer = (6..=8).contains(&date.month());
    let base_temp = if summer { 78.0 } else { 58.0 };
    let conditions = if date.day() % 7 == 0 {
        "rain"
    } else if date.day() % 3 == 0 {
        "partly-cloudy-day"
    } else {
        "clear-day"
    };
    let spread = if conditions == "clear-day" { 5.0 } else { 0.0 };

    let mut day = DailyForecast::new(date).with_hours(mock_hours(base_temp, conditions, summer));
    day.tempmax = base_temp + spread;
    day.tempmin = base_temp - spread;
    day.temp = base_temp;
    day.precipprob = match conditions {
        "rain" => 70.0,
        "partly-cloudy-day" => 30.0,
        _ => 10.0,
    };
    day.humidity = if summer { 65.0 } else { 55.0 };
    day.windspeed = if summer { 8.0 } else { 10.0 };
    day.conditions = conditions.to_string();
    day.icon = conditions.to_string();
    day.sunrise = if summer { "5:30 AM" } else { "7:00 AM" }.to_string();
    day.sunset = if summer { "8:15 PM" } else { "6:00 PM" }.to_string();
    day
}

fn mock_hours(base_temp: f64, conditions: &str, summer: bool) -> Vec<HourlyForecast> {
    let variation = if summer { 15.0 } else { 10.0 };
    (0..24)
        .map(|hour| {
            let h = f64::from(hour);
            let temp = base_temp + ((h - 6.0) * PI / 12.0).sin() * variation;
            let precip = match conditions {
                "rain" => 60.0 + f64::from(hour % 4) * 7.5,
                "partly-cloudy-day" => 20.0 + f64::from(hour % 5) * 5.0,
                _ => f64::from(hour % 3) * 3.0,
            };
            let humidity = 40.0 + ((h - 6.0) * PI / 12.0).sin() * 30.0;
            let wind = 5.0 + ((h - 12.0) * PI / 12.0).sin() * 5.0 + f64::from(hour % 2);
            HourlyForecast::new(
                format!("{hour:02}:00"),
                temp.round(),
                precip.round(),
                humidity.round(),
                (wind * 10.0).round() / 10.0,
            )
        })
        .collect()
}
