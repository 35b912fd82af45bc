//! Forecast records as returned by the weather provider.
//!
//! Field names follow the Visual Crossing timeline API (`unitGroup=us`):
//! temperatures in °F, wind in mph, probabilities and humidity in percent.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static HOUR_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}):\d{2}").unwrap());

/// Provider payloads occasionally carry `null` for numeric fields.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// One hour of a day's forecast.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HourlyForecast {
    /// Hour-of-day marker, `"HH:MM"` or `"HH:MM:SS"` on a 24-hour clock.
    pub datetime: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub temp: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub precipprob: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub windspeed: f64,
}

impl HourlyForecast {
    pub fn new(datetime: impl Into<String>, temp: f64, precipprob: f64, humidity: f64, windspeed: f64) -> Self {
        Self {
            datetime: datetime.into(),
            temp,
            precipprob,
            humidity,
            windspeed,
        }
    }

    /// Hour of day taken from the leading `HH` of the marker.
    pub fn hour(&self) -> Option<u32> {
        HOUR_MARKER
            .captures(&self.datetime)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// 12-hour clock label, e.g. `"1:00 PM"`.
    pub fn hour_label(&self) -> Option<String> {
        let hour = self.hour()?;
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let display = match hour % 12 {
            0 => 12,
            h => h,
        };
        Some(format!("{display}:00 {suffix}"))
    }
}

/// One calendar day of forecast, optionally with its hourly breakdown.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DailyForecast {
    #[serde(rename = "datetime")]
    date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub tempmax: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub tempmin: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub temp: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub precipprob: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub windspeed: f64,
    #[serde(default)]
    pub conditions: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    #[serde(default)]
    pub hours: Vec<HourlyForecast>,
}

impl DailyForecast {
    /// An empty record for `date`; readings default to zero.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tempmax: 0.0,
            tempmin: 0.0,
            temp: 0.0,
            humidity: 0.0,
            precipprob: 0.0,
            windspeed: 0.0,
            conditions: String::new(),
            icon: String::new(),
            sunrise: String::new(),
            sunset: String::new(),
            hours: Vec::new(),
        }
    }

    pub fn with_hours(mut self, hours: Vec<HourlyForecast>) -> Self {
        self.hours = hours;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Calendar weekday of `date`.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

/// Response of a single forecast fetch. Held as-is until the next fetch.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ForecastPayload {
    #[serde(rename = "resolvedAddress", default)]
    pub resolved_address: Option<String>,
    #[serde(default)]
    pub days: Vec<DailyForecast>,
}

impl ForecastPayload {
    pub fn new(days: Vec<DailyForecast>) -> Self {
        Self {
            resolved_address: None,
            days,
        }
    }
}

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Parse an English weekday name, ignoring case and surrounding whitespace.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.trim();
    WEEKDAYS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, w)| *w)
}

/// Lowercase English name of `weekday`.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize].0
}
