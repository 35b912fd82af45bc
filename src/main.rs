//! eventcast binary
//!
//! Thin CLI wrapper around the library. Loads configuration, picks the
//! forecast provider and dispatches to the selected command.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use eventcast::{Config, EventQuery, ProviderKind, TimeWindow, parse_weekday, provider_from_config};

#[derive(Parser, Debug)]
#[command(name = "eventcast", version, about = "Weather insights for recurring outdoor plans")]
struct Cli {
    /// YAML configuration file (defaults to $EVENTCAST_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use generated data instead of the live weather API.
    #[arg(long, global = true)]
    mock: bool,

    /// Number of days to fetch, starting today.
    #[arg(long, global = true)]
    days: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the event-day forecast for every week in range.
    Forecast {
        /// Place name or address, e.g. "Central Park, New York".
        #[arg(long)]
        location: String,
        /// Weekday of the event.
        #[arg(long, default_value = "friday")]
        day: String,
        /// morning, afternoon or evening.
        #[arg(long, default_value = "afternoon")]
        window: String,
        /// Write PNG charts into this directory.
        #[arg(long)]
        charts: Option<String>,
    },
    /// Update the forecast section of every event note under ROOT.
    Notes {
        #[arg(default_value = ".")]
        root: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eventcast=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.mock {
        config.provider = ProviderKind::Mock;
    }
    if let Some(days) = cli.days {
        config.horizon_days = days;
    }

    match cli.command {
        Command::Forecast {
            location,
            day,
            window,
            charts,
        } => {
            if charts.is_some() {
                config.chart_dir = charts;
            }
            config.validate()?;
            let weekday = parse_weekday(&day).ok_or_else(|| anyhow!("'{day}' is not a weekday name"))?;
            let query = EventQuery {
                weekday,
                window: TimeWindow::from_name(&window),
            };
            let provider = provider_from_config(&config)?;
            eventcast::run_forecast(provider.as_ref(), &config, location.trim(), &query).await
        }
        Command::Notes { root } => {
            config.validate()?;
            let provider = provider_from_config(&config)?;
            eventcast::notes::run_notes(&root, provider.as_ref(), &config).await
        }
    }
}
