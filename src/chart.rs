//! PNG charts for a single event day.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use tracing::debug;

use crate::report::WeekForecast;
use crate::summary::round_half_up;

const CHART_SIZE: (u32, u32) = (1200, 800);

fn draw_err(e: impl Display) -> anyhow::Error {
    anyhow!("chart drawing failed: {e}")
}

/// Padded y-axis range covering `values`.
pub fn value_range(values: &[i64]) -> (f64, f64) {
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return (0.0, 1.0);
    };
    let (min, max) = (*min as f64, *max as f64);
    let padding = if max > min { (max - min) * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

/// Write the chart for `week` to `path`.
///
/// With hourly data this is a 2x2 grid of line charts (temperature,
/// precipitation, humidity, wind); without it, a min/avg/max temperature bar
/// chart for the whole day.
pub fn render_week_chart(week: &WeekForecast, path: &Path) -> Result<()> {
    debug!(path = %path.display(), date = %week.day.date(), "rendering chart");
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    if week.series.is_empty() {
        draw_day_range(&root, week)?;
    } else {
        let s = &week.series;
        let panels = root.split_evenly((2, 2));
        let metrics: [(&str, &[i64], RGBColor); 4] = [
            ("Temperature (°F)", s.temperature.as_slice(), RED),
            ("Precipitation Chance (%)", s.precipitation.as_slice(), BLUE),
            ("Humidity (%)", s.humidity.as_slice(), GREEN),
            ("Wind Speed (mph)", s.wind.as_slice(), MAGENTA),
        ];
        for (panel, (title, values, color)) in panels.iter().zip(metrics) {
            draw_metric(panel, title, &s.labels, values, color)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_metric<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    labels: &[String],
    values: &[i64],
    color: RGBColor,
) -> Result<()> {
    let (y_start, y_end) = value_range(values);
    let x_end = values.len().saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(-0.25..x_end + 0.25, y_start..y_end)
        .map_err(draw_err)?;

    let label_at = |x: &f64| -> String {
        let nearest = x.round();
        if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
            return String::new();
        }
        labels.get(nearest as usize).cloned().unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(labels.len().max(2))
        .x_label_formatter(&label_at)
        .light_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(draw_err)?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v as f64))
        .collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
        .map_err(draw_err)?;
    chart
        .draw_series(points.iter().map(|p| Circle::new(*p, 4, color.filled())))
        .map_err(draw_err)?;
    Ok(())
}

fn draw_day_range<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, week: &WeekForecast) -> Result<()> {
    let o = &week.overview;
    let bars = [
        ("Min", o.tempmin, RED.mix(0.4)),
        ("Average", o.temp, RED.mix(0.9)),
        ("Max", o.tempmax, RED.mix(0.4)),
    ];
    let rounded: Vec<i64> = bars.iter().map(|(_, v, _)| round_half_up(*v)).collect();
    let (y_start, y_end) = value_range(&rounded);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Temperature Range {}", o.date), ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..3.0, y_start..y_end)
        .map_err(draw_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&|x: &f64| {
            let i = x.floor() as usize;
            bars.get(i).map(|b| b.0.to_string()).unwrap_or_default()
        })
        .y_label_formatter(&|y: &f64| format!("{y:.0}°F"))
        .draw()
        .map_err(draw_err)?;
    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, v, color))| {
            let x = i as f64;
            Rectangle::new([(x + 0.2, y_start), (x + 0.8, *v)], color.filled())
        }))
        .map_err(draw_err)?;
    Ok(())
}
