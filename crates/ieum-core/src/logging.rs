//! Tracing integration for structured logging.
//!
//! Host applications embedding the prediction subsystem call
//! [`init_logging`] once; libraries only emit `tracing` events.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{Error, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

/// Initialize the logging system.
///
/// `verbosity` maps 0=error, 1=warn, 2=info, 3=debug, 4+=trace; the
/// `RUST_LOG` environment variable overrides it when set. Logs go to
/// stderr, or to `log_file` when given.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>, format: LogFormat) -> Result<()> {
    let level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("ieum_core={level},ieum_engine={level}"))
    });

    let registry = tracing_subscriber::registry().with(filter);
    let init_result = match (log_file, format) {
        (None, LogFormat::Text) => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(verbosity >= 3)
                    .with_line_number(verbosity >= 3),
            )
            .try_init(),
        (None, LogFormat::Json) => registry.with(fmt::layer().json()).try_init(),
        (Some(path), LogFormat::Text) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
        }
        (Some(path), LogFormat::Json) => {
            let file = open_log_file(path)?;
            registry
                .with(fmt::layer().json().with_writer(file))
                .try_init()
        }
    };

    init_result.map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(file)
}

/// Initialize logging with defaults for tests.
///
/// Silently ignores errors; the subscriber may already be set.
pub fn init_test_logging() {
    let _ = init_logging(2, None, LogFormat::Text);
}

// =============================================================================
// Tests
// =============================================================================
