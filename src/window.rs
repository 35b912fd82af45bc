//! Time-of-day bands used to slice a day's hourly data.

use std::fmt;

use crate::model::{DailyForecast, HourlyForecast};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeWindow {
    Morning,
    #[default]
    Afternoon,
    Evening,
}

impl TimeWindow {
    /// Parse a band name. Anything unrecognized falls back to afternoon.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "morning" => TimeWindow::Morning,
            "evening" => TimeWindow::Evening,
            _ => TimeWindow::Afternoon,
        }
    }

    /// Inclusive `(start, end)` hours of the band.
    ///
    /// Adjacent bands share their boundary hour.
    pub fn bounds(self) -> (u32, u32) {
        match self {
            TimeWindow::Morning => (8, 12),
            TimeWindow::Afternoon => (12, 17),
            TimeWindow::Evening => (17, 21),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeWindow::Morning => "morning",
            TimeWindow::Afternoon => "afternoon",
            TimeWindow::Evening => "evening",
        }
    }

    pub fn contains(self, hour: u32) -> bool {
        let (start, end) = self.bounds();
        start <= hour && hour <= end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeWindow::Morning => "Morning (8AM - 12PM)",
            TimeWindow::Afternoon => "Afternoon (12PM - 5PM)",
            TimeWindow::Evening => "Evening (5PM - 9PM)",
        };
        f.write_str(label)
    }
}

/// Hours of `day` inside `window`, in the day's order.
pub fn hours_in_window(day: &DailyForecast, window: TimeWindow) -> Vec<&HourlyForecast> {
    day.hours
        .iter()
        .filter(|h| h.hour().is_some_and(|hour| window.contains(hour)))
        .collect()
}
