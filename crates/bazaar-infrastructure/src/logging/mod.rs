//! Logging setup: human-readable stdout output plus an optional one-line JSON
//! file log with daily rotation. Level is driven by `RUST_LOG`, falling back
//! to debug in debug builds and info otherwise. Safe to call more than once;
//! only the first call wins.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub fn init(log_dir: Option<PathBuf>) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    // Forward log-crate records into tracing.
    let _ = tracing_log::LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = rolling::daily(&dir, "bazaar.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .with_filter(env_filter()),
            )
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_filter(env_filter());

    let subscriber = Registry::default().with(file_layer).with(stdout_layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());
    tracing::info!(target: "bazaar::logging", "logger initialized");
    Ok(())
}

fn env_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
