//! Event note frontmatter parsing and block upsert tests
//!
//! Covers:
//! - extract_event_meta success and error paths
//! - upsert_forecast_block append/insert/replace idempotency
//! - run_notes against the mock provider

use std::fs;
use std::path::PathBuf;

use chrono::Weekday;
use eventcast::notes::{render_block, run_notes};
use eventcast::{Config, MockProvider, ProviderKind, TimeWindow, extract_event_meta, upsert_forecast_block};

fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("{}_{}", std::process::id(), name));
    fs::write(&p, contents).expect("write temp");
    p
}

#[test]
fn extract_meta_ok_and_defaults() {
    let path = write_temp_file(
        "event_ok.md",
        r#"---
location: Central Park, New York
event-day: Saturday
time-range: morning
---

# Picnic
"#,
    );
    let meta = extract_event_meta(&path).expect("meta ok");
    assert_eq!(meta.location, "Central Park, New York");
    assert_eq!(meta.query.weekday, Weekday::Sat);
    assert_eq!(meta.query.window, TimeWindow::Morning);
    let _ = fs::remove_file(&path);

    let path = write_temp_file(
        "event_default_window.md",
        "---\nlocation: Boston\nevent-day: friday\n---\n",
    );
    let meta = extract_event_meta(&path).expect("meta ok");
    assert_eq!(meta.query.window, TimeWindow::Afternoon);
    let _ = fs::remove_file(&path);
}

#[test]
fn extract_meta_errors() {
    let path = write_temp_file("event_missing.md", "---\nlocation: Rome\n---\n");
    let msg = format!("{}", extract_event_meta(&path).unwrap_err());
    assert!(msg.contains("missing 'event-day'"));
    let _ = fs::remove_file(&path);

    let path = write_temp_file("event_bad_day.md", "---\nlocation: Rome\nevent-day: someday\n---\n");
    let msg = format!("{}", extract_event_meta(&path).unwrap_err());
    assert!(msg.contains("weekday name"));
    let _ = fs::remove_file(&path);

    let path = write_temp_file("event_no_front.md", "# Just a heading\n");
    let msg = format!("{}", extract_event_meta(&path).unwrap_err());
    assert!(msg.contains("no YAML frontmatter"));
    let _ = fs::remove_file(&path);
}

#[test]
fn upsert_block_variants() {
    let new_block = render_block("Label", "NEW");

    // Append when no heading
    let mut content = String::from("# Title\n\nBody\n");
    upsert_forecast_block(&mut content, &new_block);
    assert!(content.starts_with("# Title\n\nBody\n\n## Event Forecast"));
    assert!(content.contains("NEW"));

    // Fill an existing bare heading
    let mut content2 = String::from("Intro\n\n## Event Forecast\n\nOutro\n");
    upsert_forecast_block(&mut content2, &new_block);
    assert!(content2.contains("NEW"));
    assert!(content2.contains("Outro"));
    assert_eq!(content2.matches("## Event Forecast").count(), 1);

    // A longer heading that merely starts with the name is left alone
    let mut content_tips = String::from("## Event Forecasting tips\nBring water\n");
    upsert_forecast_block(&mut content_tips, &new_block);
    assert!(content_tips.starts_with("## Event Forecasting tips\nBring water\n\n## Event Forecast\n"));
    assert_eq!(content_tips.matches("<!-- EVENTCAST:BEGIN -->").count(), 1);

    // Replace existing, keeping what follows
    let mut content3 = String::from(
        "## Event Forecast\n<!-- EVENTCAST:BEGIN -->\nOLD\n<!-- EVENTCAST:END -->\nAfter\n",
    );
    upsert_forecast_block(&mut content3, &new_block);
    assert!(content3.contains("NEW"));
    assert!(!content3.contains("OLD"));
    assert!(content3.ends_with("<!-- EVENTCAST:END -->\nAfter\n"));

    // Idempotent
    let before = content3.clone();
    upsert_forecast_block(&mut content3, &new_block);
    assert_eq!(before, content3);
}

#[test]
fn replacement_text_is_literal() {
    let mut content = String::from("## Event Forecast\n");
    upsert_forecast_block(&mut content, &render_block("Costs $1", "| a |"));
    assert!(content.contains("Costs $1"));
}

#[tokio::test]
async fn run_notes_updates_each_note_once() {
    let mut dir = std::env::temp_dir();
    dir.push(format!("eventcast_notes_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let note = dir.join("picnic.md");
    fs::write(&note, "---\nlocation: Springfield\nevent-day: sunday\n---\n\n# Picnic\n").unwrap();
    fs::write(dir.join("readme.md"), "# Not an event\n").unwrap();

    let config = Config {
        provider: ProviderKind::Mock,
        ..Config::default()
    };
    run_notes(dir.to_str().unwrap(), &MockProvider, &config).await.unwrap();
    run_notes(dir.to_str().unwrap(), &MockProvider, &config).await.unwrap();

    let content = fs::read_to_string(&note).unwrap();
    assert_eq!(content.matches("## Event Forecast").count(), 1);
    assert!(content.contains("<!-- EVENTCAST:BEGIN -->"));
    assert!(content.contains("Mock City: sunday afternoon"));
    assert!(content.contains("| Date | Temp (°F) |"));
    assert_eq!(fs::read_to_string(dir.join("readme.md")).unwrap(), "# Not an event\n");

    let _ = fs::remove_dir_all(&dir);
}
