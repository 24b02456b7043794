//! Environment-driven settings for the refresh tool.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use taginfo_loader::{LogRateConfig, RegistryConfig};
use taginfo_types::TagGroup;
use thiserror::Error;

/// Default export location when `TAGINFO_EXPORT_PATH` is not set.
pub const DEFAULT_EXPORT_PATH: &str = "taglist.txt";

/// Errors in the tool's environment settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A variable was set to a value that could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },

    /// One variable was set without another it depends on.
    #[error("{var} requires {requires} to be set")]
    Missing {
        /// Variable that was set.
        var: &'static str,
        /// Variable that is missing.
        requires: &'static str,
    },
}

/// A historical log interval update to run after the refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogUpdate {
    /// Group whose tags are updated.
    pub group: TagGroup,
    /// New logging interval in seconds.
    pub interval_secs: u32,
}

/// Settings for one run of the refresh tool.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the tag list export.
    pub export_path: PathBuf,
    /// Registry build configuration.
    pub registry: RegistryConfig,
    /// Pacing of log interval writes.
    pub log_rate: LogRateConfig,
    /// Optional dry-run log interval update.
    pub log_update: Option<LogUpdate>,
    /// Print the registry as JSON on stdout.
    pub print_json: bool,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let export_path = lookup("TAGINFO_EXPORT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

        let mut registry = RegistryConfig {
            gap_warning_threshold: parse_var(&lookup, "TAGINFO_GAP_WARNING_THRESHOLD")?,
            ..Default::default()
        };
        if let Some(max) = parse_var(&lookup, "TAGINFO_MAX_LINE_BYTES")? {
            registry.max_line_bytes = max;
        }
        if let Some(max) = parse_var(&lookup, "TAGINFO_MAX_ID_SPAN")? {
            registry.max_id_span = max;
        }

        let mut log_rate = LogRateConfig::default();
        if let Some(ms) = parse_var::<u64, _>(&lookup, "TAGINFO_WRITE_DELAY_MS")? {
            log_rate.write_delay = Duration::from_millis(ms);
        }

        let group: Option<TagGroup> = parse_var(&lookup, "TAGINFO_LOG_GROUP")?;
        let interval: Option<u32> = parse_var(&lookup, "TAGINFO_LOG_INTERVAL")?;
        let log_update = match (group, interval) {
            (Some(group), Some(interval_secs)) => Some(LogUpdate {
                group,
                interval_secs,
            }),
            (Some(_), None) => {
                return Err(SettingsError::Missing {
                    var: "TAGINFO_LOG_GROUP",
                    requires: "TAGINFO_LOG_INTERVAL",
                })
            }
            (None, Some(_)) => {
                return Err(SettingsError::Missing {
                    var: "TAGINFO_LOG_INTERVAL",
                    requires: "TAGINFO_LOG_GROUP",
                })
            }
            (None, None) => None,
        };

        let print_json = matches!(
            lookup("TAGINFO_PRINT_JSON").as_deref(),
            Some("1") | Some("true")
        );

        Ok(Self {
            export_path,
            registry,
            log_rate,
            log_update,
            print_json,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, SettingsError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(SettingsError::Invalid { var, value }),
        },
    }
}
