//! Settings for opening a [Store](crate::Store).

use std::path::PathBuf;

use serde::Deserialize;

/// The timezone used when no other timezone is configured.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// Where the database lives and which clock to stamp deals with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File path to the SQLite database, `None` for an in-memory database.
    pub db_path: Option<PathBuf>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            local_timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}
