//! File-based logging.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → dinedeck.log
//! ```
//!
//! # Features
//!
//! - **File Output**: Events written to `<data_dir>/dinedeck.log`, since the UI owns the terminal
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option (`--log-level` / `DINEDECK_TRACE_LEVEL`)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
