//! Chart series, averages and the one-line outlook for an event window.

use chrono::NaiveDate;

use crate::model::{DailyForecast, HourlyForecast};

/// Round to the nearest integer, halves toward positive infinity.
///
/// `70.5 -> 71`, `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Rounded per-hour values for the hours of an event window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HourlySeries {
    pub labels: Vec<String>,
    pub temperature: Vec<i64>,
    pub precipitation: Vec<i64>,
    pub humidity: Vec<i64>,
    pub wind: Vec<i64>,
}

impl HourlySeries {
    pub fn from_hours(hours: &[&HourlyForecast]) -> Self {
        let mut series = HourlySeries::default();
        for h in hours {
            series
                .labels
                .push(h.hour_label().unwrap_or_else(|| h.datetime.clone()));
            series.temperature.push(round_half_up(h.temp));
            series.precipitation.push(round_half_up(h.precipprob));
            series.humidity.push(round_half_up(h.humidity));
            series.wind.push(round_half_up(h.windspeed));
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Averages of the rounded values, rounded again. `None` when empty.
    pub fn summary(&self) -> Option<Summary> {
        Some(Summary {
            avg_temp: mean(&self.temperature)?,
            avg_precip: mean(&self.precipitation)?,
            avg_humidity: mean(&self.humidity)?,
            avg_wind: mean(&self.wind)?,
        })
    }
}

fn mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let total: i64 = values.iter().sum();
    Some(round_half_up(total as f64 / values.len() as f64))
}

/// Rounded averages over an event window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub avg_temp: i64,
    pub avg_precip: i64,
    pub avg_humidity: i64,
    pub avg_wind: i64,
}

impl Summary {
    /// Daily-level averages, for days the provider sent without hours.
    pub fn from_day(day: &DailyForecast) -> Self {
        Summary {
            avg_temp: round_half_up(day.temp),
            avg_precip: round_half_up(day.precipprob),
            avg_humidity: round_half_up(day.humidity),
            avg_wind: round_half_up(day.windspeed),
        }
    }

    pub fn describe(&self) -> String {
        describe(self)
    }
}

/// Averages over `hours`, rounding each hour before averaging.
pub fn summarize(hours: &[&HourlyForecast]) -> Option<Summary> {
    HourlySeries::from_hours(hours).summary()
}

/// Plain-English outlook, e.g. `"mild, low chance of precipitation, calm and dry."`.
pub fn describe(summary: &Summary) -> String {
    let temp = if summary.avg_temp > 75 {
        "warm"
    } else if summary.avg_temp > 60 {
        "mild"
    } else {
        "cool"
    };
    let precip = if summary.avg_precip > 50 {
        "high chance of precipitation"
    } else if summary.avg_precip > 20 {
        "some chance of precipitation"
    } else {
        "low chance of precipitation"
    };
    let wind = if summary.avg_wind > 15 {
        "windy"
    } else if summary.avg_wind > 8 {
        "breezy"
    } else {
        "calm"
    };
    let humidity = if summary.avg_humidity > 70 {
        "humid"
    } else if summary.avg_humidity > 40 {
        "moderate humidity"
    } else {
        "dry"
    };
    format!("{temp}, {precip}, {wind} and {humidity}.")
}

/// Whole-day view: temperature range plus conditions and daylight.
#[derive(Clone, Debug, PartialEq)]
pub struct DayOverview {
    pub date: NaiveDate,
    pub tempmin: f64,
    pub temp: f64,
    pub tempmax: f64,
    pub conditions: String,
    pub sunrise: String,
    pub sunset: String,
    pub summary: Summary,
}

impl DayOverview {
    pub fn from_day(day: &DailyForecast) -> Self {
        DayOverview {
            date: day.date(),
            tempmin: day.tempmin,
            temp: day.temp,
            tempmax: day.tempmax,
            conditions: day.conditions.clone(),
            sunrise: day.sunrise.clone(),
            sunset: day.sunset.clone(),
            summary: Summary::from_day(day),
        }
    }
}
