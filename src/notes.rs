//! Event notes: Markdown files whose YAML frontmatter names a location and
//! a recurring event day. Each note gets an idempotent forecast section.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use regex::Regex;
use serde_yaml::Value as YamlValue;
use std::sync::LazyLock;
use std::{fs, path::Path};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::model::{parse_weekday, weekday_name};
use crate::provider::ForecastProvider;
use crate::report::{EventQuery, build_report, render_table};
use crate::window::TimeWindow;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^---\s*(.*?)\s*---").unwrap());
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?s)##\\s*Event Forecast\\s*\n<!-- EVENTCAST:BEGIN -->.*?<!-- EVENTCAST:END -->\n?").unwrap()
});
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##[ \t]*Event Forecast[ \t]*$\n?").unwrap());

/// Metadata extracted from a note's YAML frontmatter.
#[derive(Debug)]
pub struct EventNote {
    pub location: String,
    pub query: EventQuery,
    pub path: String,
}

fn yaml_str<'a>(yaml: &'a YamlValue, key: &str) -> Option<&'a str> {
    yaml.get(key).and_then(|v| v.as_str()).map(str::trim)
}

/// Read the YAML frontmatter and extract the event fields.
///
/// `location` and `event-day` are required; `time-range` defaults to afternoon.
pub fn extract_event_meta(path: &Path) -> Result<EventNote> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let yaml_str_block = FRONTMATTER
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| anyhow!("no YAML frontmatter"))?
        .as_str();

    let yaml: YamlValue = serde_yaml::from_str(yaml_str_block)?;
    let location = yaml_str(&yaml, "location")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("missing 'location'"))?
        .to_string();
    let day = yaml_str(&yaml, "event-day").ok_or_else(|| anyhow!("missing 'event-day' (weekday name)"))?;
    let weekday = parse_weekday(day).ok_or_else(|| anyhow!("'event-day' must be a weekday name, got '{day}'"))?;
    let window = yaml_str(&yaml, "time-range")
        .map(TimeWindow::from_name)
        .unwrap_or_default();

    Ok(EventNote {
        location,
        query: EventQuery { weekday, window },
        path: path.to_string_lossy().to_string(),
    })
}

/// Insert or replace the forecast block under the `## Event Forecast` heading.
pub fn upsert_forecast_block(content: &mut String, new_block: &str) {
    if BLOCK.is_match(content) {
        *content = BLOCK.replace(content, regex::NoExpand(new_block)).to_string();
    } else if HEADING.is_match(content) {
        *content = HEADING.replace(content, regex::NoExpand(new_block)).to_string();
    } else {
        if !content.is_empty() && !content.ends_with("\n\n") {
            content.push_str(if content.ends_with('\n') { "\n" } else { "\n\n" });
        }
        content.push_str(new_block);
    }
}

/// The full Markdown section written into a note.
pub fn render_block(label: &str, table: &str) -> String {
    format!("## Event Forecast\n<!-- EVENTCAST:BEGIN -->\n**{label}**\n\n{table}\n<!-- EVENTCAST:END -->\n")
}

/// Fetch, summarize and write the forecast section of a single note.
pub async fn process_note(provider: &dyn ForecastProvider, config: &Config, note: &EventNote) -> Result<()> {
    let (start, end) = crate::fetch_range(Local::now().date_naive(), config.horizon_days);
    let payload = provider.forecast(&note.location, start, end).await?;

    let weeks = build_report(&payload, &note.query);
    let label = format!(
        "{}: {} {}, {} → {}",
        payload.resolved_address.as_deref().unwrap_or(&note.location),
        weekday_name(note.query.weekday),
        note.query.window.name(),
        start,
        end
    );
    let block = render_block(&label, &render_table(&weeks));

    let mut content = fs::read_to_string(&note.path)?;
    upsert_forecast_block(&mut content, &block);
    fs::write(&note.path, content).with_context(|| format!("failed to write {}", note.path))?;
    Ok(())
}

/// Update every event note under `root`.
pub async fn run_notes(root: &str, provider: &dyn ForecastProvider, config: &Config) -> Result<()> {
    let mut notes = vec![];
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if entry.path().extension().is_some_and(|ext| ext == "md") {
            match extract_event_meta(entry.path()) {
                Ok(meta) => notes.push(meta),
                Err(e) => warn!(path = %entry.path().display(), "skipping note: {e}"),
            }
        }
    }

    if notes.is_empty() {
        println!("No event notes with location/event-day found.");
        return Ok(());
    }

    let mut failed = 0usize;
    for note in &notes {
        match process_note(provider, config, note).await {
            Ok(()) => {
                info!(path = %note.path, provider = provider.name(), "note updated");
                println!("Updated forecast: {}", note.path);
            }
            Err(e) => {
                error!(path = %note.path, "failed to update note: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} notes could not be updated; see the log above", notes.len());
    }
    Ok(())
}
