//! Window filtering and summary tests (no network)
//! - inclusive band boundaries
//! - round-then-average convention
//! - outlook thresholds

use chrono::NaiveDate;
use eventcast::{
    DailyForecast, HourlyForecast, HourlySeries, Summary, TimeWindow, describe, hours_in_window, round_half_up,
    summarize,
};

fn hour(marker: &str, temp: f64) -> HourlyForecast {
    HourlyForecast::new(marker, temp, 10.0, 50.0, 5.0)
}

fn day_with_hours(markers: &[&str]) -> DailyForecast {
    let date = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
    DailyForecast::new(date).with_hours(markers.iter().map(|m| hour(m, 70.0)).collect())
}

#[test]
fn hour_marker_parsing() {
    assert_eq!(hour("08:00", 0.0).hour(), Some(8));
    assert_eq!(hour("17:00:00", 0.0).hour(), Some(17));
    assert_eq!(hour("noon", 0.0).hour(), None);
    assert_eq!(hour("00:00", 0.0).hour_label().as_deref(), Some("12:00 AM"));
    assert_eq!(hour("12:00", 0.0).hour_label().as_deref(), Some("12:00 PM"));
    assert_eq!(hour("13:00", 0.0).hour_label().as_deref(), Some("1:00 PM"));
}

#[test]
fn window_names_fall_back_to_afternoon() {
    assert_eq!(TimeWindow::from_name("Morning"), TimeWindow::Morning);
    assert_eq!(TimeWindow::from_name("evening"), TimeWindow::Evening);
    assert_eq!(TimeWindow::from_name("night"), TimeWindow::Afternoon);
    assert_eq!(TimeWindow::from_name(""), TimeWindow::Afternoon);
    assert_eq!(TimeWindow::Evening.bounds(), (17, 21));
    assert_eq!(TimeWindow::Morning.to_string(), "Morning (8AM - 12PM)");
}

#[test]
fn afternoon_includes_both_boundaries() {
    let day = day_with_hours(&["11:00", "12:00", "13:00", "17:00", "18:00"]);
    let hours: Vec<u32> = hours_in_window(&day, TimeWindow::Afternoon)
        .iter()
        .filter_map(|h| h.hour())
        .collect();
    assert_eq!(hours, vec![12, 13, 17]);
}

#[test]
fn adjacent_bands_share_boundary_hour() {
    let markers: Vec<String> = (0..24).map(|h| format!("{h:02}:00:00")).collect();
    let refs: Vec<&str> = markers.iter().map(String::as_str).collect();
    let day = day_with_hours(&refs);

    let morning = hours_in_window(&day, TimeWindow::Morning);
    let afternoon = hours_in_window(&day, TimeWindow::Afternoon);
    let evening = hours_in_window(&day, TimeWindow::Evening);
    assert_eq!(morning.len(), 5);
    assert_eq!(afternoon.len(), 6);
    assert_eq!(evening.len(), 5);
    assert_eq!(morning.last().unwrap().hour(), afternoon.first().unwrap().hour());
    assert_eq!(afternoon.last().unwrap().hour(), evening.first().unwrap().hour());
}

#[test]
fn no_hourly_data_yields_no_summary() {
    let day = DailyForecast::new(NaiveDate::from_ymd_opt(2025, 6, 6).unwrap());
    let hours = hours_in_window(&day, TimeWindow::Morning);
    assert!(hours.is_empty());
    assert_eq!(summarize(&hours), None);
    assert_eq!(HourlySeries::from_hours(&hours).summary(), None);
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_half_up(70.5), 71);
    assert_eq!(round_half_up(70.49), 70);
    assert_eq!(round_half_up(-2.5), -2);
    assert_eq!(round_half_up(-2.51), -3);
    assert_eq!(round_half_up(0.5), 1);
}

#[test]
fn hours_are_rounded_before_averaging() {
    let a = hour("12:00", 70.4);
    let b = hour("13:00", 70.6);
    let s = summarize(&[&a, &b]).unwrap();
    // [70, 71] -> 70.5 -> 71
    assert_eq!(s.avg_temp, 71);

    // Raw mean 70.47 would give 70; rounded hours [71, 71, 70] give 71.
    let c = hour("12:00", 70.6);
    let d = hour("13:00", 70.6);
    let e = hour("14:00", 70.2);
    assert_eq!(summarize(&[&c, &d, &e]).unwrap().avg_temp, 71);
}

#[test]
fn series_keeps_rounded_values_and_labels() {
    let a = HourlyForecast::new("12:00", 70.4, 19.5, 55.5, 7.49);
    let b = HourlyForecast::new("13:00", 72.6, 30.0, 60.0, 9.5);
    let series = HourlySeries::from_hours(&[&a, &b]);
    assert_eq!(series.labels, vec!["12:00 PM", "1:00 PM"]);
    assert_eq!(series.temperature, vec![70, 73]);
    assert_eq!(series.precipitation, vec![20, 30]);
    assert_eq!(series.humidity, vec![56, 60]);
    assert_eq!(series.wind, vec![7, 10]);

    let s = series.summary().unwrap();
    assert_eq!(
        s,
        Summary {
            avg_temp: 72,
            avg_precip: 25,
            avg_humidity: 58,
            avg_wind: 9,
        }
    );
}

#[test]
fn describe_boundaries_fall_to_lower_bucket() {
    let s = Summary {
        avg_temp: 75,
        avg_precip: 50,
        avg_humidity: 70,
        avg_wind: 15,
    };
    assert_eq!(describe(&s), "mild, some chance of precipitation, breezy and moderate humidity.");
}

#[test]
fn describe_upper_and_lower_buckets() {
    let high = Summary {
        avg_temp: 76,
        avg_precip: 51,
        avg_humidity: 71,
        avg_wind: 16,
    };
    assert_eq!(high.describe(), "warm, high chance of precipitation, windy and humid.");

    let low = Summary {
        avg_temp: 60,
        avg_precip: 20,
        avg_humidity: 40,
        avg_wind: 8,
    };
    assert_eq!(low.describe(), "cool, low chance of precipitation, calm and dry.");
}

#[test]
fn daily_summary_rounds_once() {
    let mut day = DailyForecast::new(NaiveDate::from_ymd_opt(2025, 6, 6).unwrap());
    day.temp = 68.5;
    day.precipprob = 12.4;
    day.humidity = 70.5;
    day.windspeed = 8.2;
    let s = Summary::from_day(&day);
    assert_eq!((s.avg_temp, s.avg_precip, s.avg_humidity, s.avg_wind), (69, 12, 71, 8));
}
