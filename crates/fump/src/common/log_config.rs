//! Log configuration file loaded by `--log_cfg`.
//!
//! The file is ini-style: sections with `key = value` pairs, read as TOML.
//! Every section and key is optional.
//!
//! ```toml
//! [logger]
//! level = "debug"
//! filter = "fump=trace"
//!
//! [handler]
//! stream = "stdout"
//! file = "/var/log/fump.log"
//!
//! [formatter]
//! format = "level"
//! ansi = false
//! ```

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::common::format::CRITICAL_TARGET;
use crate::common::telemetry::TelemetryError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogFileConfig {
    pub logger: LoggerSection,
    pub handler: HandlerSection,
    pub formatter: FormatterSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSection {
    pub level: LevelSetting,
    /// `EnvFilter` directives; replaces `level` when present.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerSection {
    pub stream: LogStream,
    /// Append to this file instead of writing to `stream`.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatterSection {
    pub format: LogFormat,
    /// Defaults to whether the stream is a terminal; files never get colors.
    pub ansi: Option<bool>,
}

/// Level names are case-insensitive; `warning` is accepted as an alias of
/// `warn`. `critical` keeps only the abort records on [`CRITICAL_TARGET`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LevelSetting {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
    Off,
}

impl LevelSetting {
    pub fn directive(self) -> String {
        match self {
            LevelSetting::Trace => "trace".to_string(),
            LevelSetting::Debug => "debug".to_string(),
            LevelSetting::Info => "info".to_string(),
            LevelSetting::Warn => "warn".to_string(),
            LevelSetting::Error => "error".to_string(),
            LevelSetting::Critical => format!("off,{CRITICAL_TARGET}=error"),
            LevelSetting::Off => "off".to_string(),
        }
    }
}

impl TryFrom<String> for LevelSetting {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Ok(LevelSetting::Trace),
            "debug" => Ok(LevelSetting::Debug),
            "info" => Ok(LevelSetting::Info),
            "warn" | "warning" => Ok(LevelSetting::Warn),
            "error" => Ok(LevelSetting::Error),
            "critical" => Ok(LevelSetting::Critical),
            "off" => Ok(LevelSetting::Off),
            _ => Err(format!(
                "unknown level `{value}`, expected one of: trace, debug, info, warn, error, critical, off"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    #[default]
    Stderr,
    Stdout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Message only.
    #[default]
    Bare,
    /// `LEVEL - message`.
    Level,
    /// tracing-subscriber's full text format with timestamps and targets.
    Full,
    /// One JSON object per line.
    Json,
}

impl LogFileConfig {
    pub fn load(path: &Path) -> Result<Self, TelemetryError> {
        let content = fs::read_to_string(path).map_err(|source| TelemetryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| TelemetryError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn env_filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        match self.logger.filter.as_deref().map(str::trim) {
            Some(directives) if !directives.is_empty() => EnvFilter::builder().parse(directives),
            _ => EnvFilter::builder().parse(self.logger.level.directive()),
        }
    }
}
