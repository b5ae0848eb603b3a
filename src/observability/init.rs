//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "dinedeck.log";

/// Initializes the tracing subscriber with a rotating log file.
///
/// The terminal UI owns stdout, so every event goes to
/// `<data_dir>/dinedeck.log` instead.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` environment variable if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns `None` without installing anything if that fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// Returns the log file path on success.
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = crate::infrastructure::get_data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let log_file = data_dir.join(LOG_FILE_NAME);
    let writer = FileWriter::new(log_file.clone());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(config.trace_level.as_deref()))
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true));

    let _ = subscriber.try_init();
    Some(log_file)
}

fn env_filter(trace_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(trace_level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
