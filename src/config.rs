//! Runtime configuration: defaults, then an optional YAML file, then the
//! environment. The binary applies CLI flags last.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{env, fs, path::Path};

const DEFAULT_BASE: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Longest range the timeline API forecasts day by day.
pub const MAX_HORIZON_DAYS: i64 = 45;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    #[default]
    VisualCrossing,
    Mock,
}

impl ProviderKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "visual-crossing" | "visualcrossing" => Ok(ProviderKind::VisualCrossing),
            "mock" => Ok(ProviderKind::Mock),
            other => bail!("unknown provider '{other}' (expected visual-crossing or mock)"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Days fetched starting today.
    pub horizon_days: i64,
    /// Where PNG charts go; no charts when unset.
    pub chart_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderKind::default(),
            api_key: None,
            base_url: DEFAULT_BASE.to_string(),
            horizon_days: 28,
            chart_dir: None,
        }
    }
}

impl Config {
    /// Load from `path` (if given, else `EVENTCAST_CONFIG`) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = env::var("EVENTCAST_CONFIG").ok();
        let path = path.map(Path::to_path_buf).or(from_env.map(Into::into));
        let mut config = match path {
            Some(p) => Config::from_file(&p)?,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Config::from_yaml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = env::var("EVENTCAST_PROVIDER") {
            self.provider = ProviderKind::parse(&v)?;
        }
        if let Ok(v) = env::var("VISUAL_CROSSING_API_KEY") {
            self.api_key = Some(v);
        }
        if let Ok(v) = env::var("VISUAL_CROSSING_BASE") {
            self.base_url = v;
        }
        if let Ok(v) = env::var("EVENTCAST_HORIZON_DAYS") {
            self.horizon_days = v
                .trim()
                .parse()
                .context("EVENTCAST_HORIZON_DAYS must be an integer")?;
        }
        if let Ok(v) = env::var("EVENTCAST_CHART_DIR") {
            self.chart_dir = Some(v);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let mut issues: Vec<String> = Vec::new();
        if !(1..=MAX_HORIZON_DAYS).contains(&self.horizon_days) {
            issues.push(format!("horizon-days must be between 1 and {MAX_HORIZON_DAYS}"));
        }
        if self.provider == ProviderKind::VisualCrossing {
            if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
                issues.push("VISUAL_CROSSING_API_KEY is not set (or use the mock provider)".into());
            }
            if self.base_url.trim().is_empty() {
                issues.push("base-url must not be empty".into());
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            bail!("invalid configuration: {}", issues.join("; "))
        }
    }
}
