//! Tracing subscriber setup.
//!
//! Console output follows `RUST_LOG` and `LOG_FORMAT`. When an error log
//! file is configured, ERROR-level events are also appended to it through a
//! non-blocking writer; this file is the operational error log.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber.
///
/// The returned guard must be kept alive for the lifetime of the process so
/// buffered error-log lines are flushed on exit.
///
/// # Errors
///
/// Returns an error if the log filter is invalid or the subscriber was
/// already installed.
pub fn init_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", config.log_level))?;

    let console: BoxedLayer = if config.log_format == "json" {
        fmt::layer().json().with_filter(env_filter).boxed()
    } else {
        fmt::layer().with_filter(env_filter).boxed()
    };

    let mut layers = vec![console];
    let mut guard = None;

    if let Some(ref path) = config.error_log_file {
        let (error_layer, file_guard) = error_file_layer(Path::new(path));
        layers.push(error_layer);
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

fn error_file_layer(path: &Path) -> (BoxedLayer, WorkerGuard) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("app_errors.log");

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR)
        .boxed();

    (layer, guard)
}
