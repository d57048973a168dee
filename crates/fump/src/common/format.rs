//! Line formats for the default and verbose logging modes.

use std::fmt;

use tracing::Event;
use tracing::Level;
use tracing::Metadata;
use tracing::Subscriber;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::registry::LookupSpan;

/// Target of records that abort the run. They are `ERROR` events rendered
/// with the `CRITICAL` label.
pub const CRITICAL_TARGET: &str = "fump::critical";

/// Writes one line per event: the message and its fields, optionally
/// prefixed by `LEVEL - `.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFormat {
    with_level: bool,
}

impl MessageFormat {
    pub fn bare() -> Self {
        Self { with_level: false }
    }

    pub fn with_level() -> Self {
        Self { with_level: true }
    }
}

impl<S, N> FormatEvent<S, N> for MessageFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.with_level {
            write!(writer, "{} - ", level_label(event.metadata()))?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

pub fn level_label(metadata: &Metadata<'_>) -> &'static str {
    if metadata.target() == CRITICAL_TARGET {
        return "CRITICAL";
    }
    match *metadata.level() {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        _ => "ERROR",
    }
}
