//! File-based logging setup

use std::fs::{self, File};

use shelf_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "SHELF_LOG";

/// Default filter when `SHELF_LOG` is unset
const DEFAULT_FILTER: &str = "shelf_core=info,shelf_cli=info";

/// Send logs to the configured log file
///
/// Logging never blocks a command: if the file can't be created a warning
/// is printed and the command runs without logs.
pub fn init(config: &Config) {
    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, e);
            return;
        }
    }

    let log_file = match File::options().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
