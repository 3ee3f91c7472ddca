use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Build the env filter: `RUST_LOG` wins, otherwise the configured default
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_filter))
}

/// Initializes console logging, plus a daily-rolling JSON file when enabled.
///
/// Logs go to stderr so stdout stays free for batch output. The returned
/// guard flushes the file writer on drop and must be held for the life of
/// the process.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = if config.file_output {
        match fs::create_dir_all(&config.directory) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(&config.directory, "sales.log");
                let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
                let layer = fmt::layer().json().with_writer(non_blocking_writer);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Could not create log directory '{}': {}; logging to console only",
                    config.directory.display(),
                    e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    // try_init: a subscriber may already be installed by an embedding application
    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}
