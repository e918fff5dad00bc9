//! Sets up the global `tracing` subscriber for applications that embed the store.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::Error;

/// Log INFO and above to stdout and, if `debug_log_path` is given, DEBUG and
/// above to that file.
///
/// The file is created if it does not exist and appended to if it does.
///
/// # Errors
/// Returns [Error::LoggingError] if the log file cannot be opened or a global
/// subscriber has already been set.
pub fn setup_logging(debug_log_path: Option<&Path>) -> Result<(), Error> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(filter::LevelFilter::INFO);

    let debug_log = match debug_log_path {
        Some(path) => {
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|error| {
                    Error::LoggingError(format!("could not open {}: {error}", path.display()))
                })?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .try_init()
        .map_err(|error| Error::LoggingError(error.to_string()))
}
