//! Application configuration
//!
//! Layered as defaults, then an optional TOML file, then environment
//! variables prefixed with `VVM_MONITOR_` (nested keys separated by `__`,
//! e.g. `VVM_MONITOR_POLLING__INTERVAL_SECS=30`).

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use application::StopConfigInput;
use config::ConfigError;
use domain::TimeWindow;
use integration_vvm::VvmConfig;
use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'text' or 'json'")),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// VVM backend
    #[serde(default)]
    pub vvm: VvmConfig,

    /// Refresh schedule
    #[serde(default)]
    pub polling: PollingConfig,

    /// Stops to monitor
    #[serde(default)]
    pub stops: Vec<StopEntryConfig>,
}

/// Refresh schedule of the monitored stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between two refreshes of every stop
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    60
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollingConfig {
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// One configured stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEntryConfig {
    /// Upstream stop identifier
    pub stop_id: String,

    /// Minutes ahead to show departures for
    #[serde(default = "default_timeframe")]
    pub timeframe: i64,

    /// Destination substring filter; empty shows all
    #[serde(default)]
    pub direction: String,
}

fn default_timeframe() -> i64 {
    i64::from(TimeWindow::SETUP_DEFAULT_MINUTES)
}

impl From<&StopEntryConfig> for StopConfigInput {
    fn from(entry: &StopEntryConfig) -> Self {
        Self::new(entry.stop_id.as_str())
            .with_timeframe(entry.timeframe)
            .with_direction(entry.direction.as_str())
    }
}

impl AppConfig {
    /// Load configuration from defaults, a file and the environment
    ///
    /// Without `path`, `config.toml` in the working directory is used if it
    /// exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.map_or_else(
            || config::File::with_name("config").required(false),
            |path| config::File::from(path).required(true),
        );

        let builder = config::Config::builder()
            .set_default("log_format", "text")?
            .set_default("vvm.base_url", VvmConfig::default().base_url)?
            .set_default("polling.interval_secs", default_interval_secs())?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("VVM_MONITOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the deserializer cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vvm
            .validate()
            .map_err(|e| ConfigError::Message(format!("vvm: {e}")))?;

        if self.polling.interval_secs == 0 {
            return Err(ConfigError::Message(
                "polling.interval_secs must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.stops {
            let stop_id = entry.stop_id.trim();
            if stop_id.is_empty() {
                return Err(ConfigError::Message(
                    "stops: stop_id must not be empty".to_string(),
                ));
            }
            if !seen.insert(stop_id) {
                return Err(ConfigError::Message(format!(
                    "stops: {stop_id} is configured more than once"
                )));
            }
        }

        Ok(())
    }

    /// Configured stops as setup input
    pub fn stop_inputs(&self) -> Vec<StopConfigInput> {
        self.stops.iter().map(StopConfigInput::from).collect()
    }
}
