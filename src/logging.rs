//! Logging setup on top of `tracing`
//!
//! Lines go to stdout with an RFC 3339 UTC timestamp and level. A file sink
//! can be added through [`LoggingOptions::file`], optionally rotated.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::{self, NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type LayeredEnvFilter = Layered<EnvFilter, Registry>;
type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global subscriber described by `options`.
///
/// Does nothing when a subscriber is already installed. The returned guard
/// flushes the file sink on drop and must be held until the process exits.
pub fn init(options: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let filter = level_filter(&options.level)?;

    let mut layers: Vec<BoxedLayer<LayeredEnvFilter>> = vec![stdout_layer(options.color)];
    let file = file_writer(options)?;
    let guard = file.map(|(writer, guard)| {
        layers.push(
            fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(writer)
                .with_target(false)
                .with_level(true)
                .boxed(),
        );
        guard
    });

    Registry::default()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

/// Install a plain stdout subscriber at `info`, for errors raised before
/// [`init`] could run (unreadable config, bad log level).
///
/// Does nothing when a subscriber is already installed.
pub fn init_fallback() {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let _ = Registry::default()
        .with(EnvFilter::new("info"))
        .with(stdout_layer::<LayeredEnvFilter>(false))
        .try_init();
}

/// Parse a level or `EnvFilter` directive string.
pub fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))
}

fn file_writer(options: &LoggingOptions) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(path) = options.file.as_ref() else {
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let sink = match options.rotation {
        Some(rotation) => {
            let file_name = path.file_name().ok_or_else(|| {
                Error::Config(format!(
                    "Log file path '{}' must include a filename when rotation is enabled",
                    path.display()
                ))
            })?;

            let appender = match rotation {
                LogRotation::Hourly => rolling::hourly(dir, file_name),
                LogRotation::Daily => rolling::daily(dir, file_name),
            };

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(appender)
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;

            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file)
        }
    };

    Ok(Some(sink))
}

fn stdout_layer<S>(color: bool) -> BoxedLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stdout)
        .with_ansi(color)
        .with_target(false)
        .with_level(true)
        .boxed()
}
