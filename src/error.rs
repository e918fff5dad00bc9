//! Defines the crate level error type and the conversion from SQLite errors.

/// The errors that may occur when reading or writing ledger records.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was absent or empty.
    ///
    /// Nothing is written to the database when this error is returned. The
    /// caller should ask the client to fill in the named field and try again.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// A number field was NaN or infinite.
    ///
    /// Nothing is written to the database when this error is returned.
    #[error("the field \"{0}\" must be a finite number")]
    NotFinite(&'static str),

    /// The requested record was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested record could not be found")]
    NotFound,

    /// Tried to update a party that does not exist.
    #[error("tried to update a party that is not in the database")]
    UpdateMissingParty,

    /// Tried to delete a party that does not exist, or the ID and name did not
    /// refer to the same party.
    #[error("tried to delete a party that is not in the database")]
    DeleteMissingParty,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The log file could not be opened or the global logger was already set.
    #[error("could not set up logging: {0}")]
    LoggingError(String),
}

impl Error {
    /// Whether the error was caused by the input rather than by the store.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::MissingField(_) | Error::NotFinite(_))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
