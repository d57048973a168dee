//! Telemetry and tracing setup.
//!
//! The logging context is an explicit [`Telemetry`] value. Nothing is
//! installed as the global default; the run is executed inside
//! [`Telemetry::in_scope`] and every record it emits goes through that context.

use std::fs::OpenOptions;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::app::commands::LogMode;
use crate::common::format::MessageFormat;
use crate::common::log_config::LogFileConfig;
use crate::common::log_config::LogFormat;
use crate::common::log_config::LogStream;

const DEFAULT_LEVEL: &str = "info";
const VERBOSE_LEVEL: &str = "debug";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to read log configuration {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid log configuration {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid filter directives in log configuration {}", .path.display())]
    Filter {
        path: PathBuf,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to open log file {}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct Telemetry {
    dispatch: Dispatch,
    _guard: Option<WorkerGuard>,
}

impl Telemetry {
    /// Builds the logging context for `mode`, writing to stderr unless a log
    /// configuration file says otherwise.
    pub fn init(mode: &LogMode) -> Result<Self, TelemetryError> {
        Self::builder(mode.clone()).build()
    }

    pub fn builder(mode: LogMode) -> TelemetryBuilder {
        TelemetryBuilder { mode, writer: None }
    }

    /// Default-mode context on stderr, used to report a failure to build the
    /// requested one.
    pub fn fallback() -> Self {
        Self::from_dispatch(message_dispatch(
            EnvFilter::new(DEFAULT_LEVEL),
            MessageFormat::bare(),
            BoxMakeWriter::new(io::stderr),
        ))
    }

    /// Runs `f` with this context as the current subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            _guard: None,
        }
    }
}

pub struct TelemetryBuilder {
    mode: LogMode,
    writer: Option<BoxMakeWriter>,
}

impl TelemetryBuilder {
    /// Replaces the output stream. A file handler from a log configuration
    /// file still takes precedence.
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    pub fn build(self) -> Result<Telemetry, TelemetryError> {
        match self.mode {
            LogMode::Default => Ok(Telemetry::from_dispatch(message_dispatch(
                EnvFilter::new(DEFAULT_LEVEL),
                MessageFormat::bare(),
                self.writer.unwrap_or_else(|| BoxMakeWriter::new(io::stderr)),
            ))),
            LogMode::Verbose => Ok(Telemetry::from_dispatch(message_dispatch(
                EnvFilter::new(VERBOSE_LEVEL),
                MessageFormat::with_level(),
                self.writer.unwrap_or_else(|| BoxMakeWriter::new(io::stderr)),
            ))),
            LogMode::File(path) => {
                let config = LogFileConfig::load(&path)?;
                from_file_config(&path, &config, self.writer)
            }
        }
    }
}

fn from_file_config(
    config_path: &Path,
    config: &LogFileConfig,
    writer: Option<BoxMakeWriter>,
) -> Result<Telemetry, TelemetryError> {
    let filter = config
        .env_filter()
        .map_err(|source| TelemetryError::Filter {
            path: config_path.to_path_buf(),
            source,
        })?;

    let (writer, guard, terminal) = match &config.handler.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| TelemetryError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => match (writer, config.handler.stream) {
            (Some(writer), _) => (writer, None, false),
            (None, LogStream::Stderr) => (
                BoxMakeWriter::new(io::stderr),
                None,
                io::stderr().is_terminal(),
            ),
            (None, LogStream::Stdout) => (
                BoxMakeWriter::new(io::stdout),
                None,
                io::stdout().is_terminal(),
            ),
        },
    };

    let dispatch = match config.formatter.format {
        LogFormat::Bare => message_dispatch(filter, MessageFormat::bare(), writer),
        LogFormat::Level => message_dispatch(filter, MessageFormat::with_level(), writer),
        LogFormat::Full => Dispatch::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(config.formatter.ansi.unwrap_or(terminal))
                .with_writer(writer)
                .finish(),
        ),
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .json()
                .with_writer(writer)
                .finish(),
        ),
    };

    Ok(Telemetry {
        dispatch,
        _guard: guard,
    })
}

fn message_dispatch(filter: EnvFilter, format: MessageFormat, writer: BoxMakeWriter) -> Dispatch {
    Dispatch::new(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .event_format(format)
            .with_writer(writer)
            .finish(),
    )
}
