//! Implements the handle that request handlers use to read and write records.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::{
    Error,
    config::StoreConfig,
    db::initialize,
    deal::{self, Deal, DealId, NewDeal},
    party::{self, NewParty, Party, PartyId, PartyUpdate},
};

/// A shared handle to the ledger database.
///
/// Cloning the handle is cheap and every clone refers to the same connection.
/// Each method holds the connection for one operation only and runs that
/// operation in its own transaction, which is committed before returning.
#[derive(Debug, Clone)]
pub struct Store {
    /// The database connection
    db_connection: Arc<Mutex<Connection>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    local_timezone: String,
}

impl Store {
    /// Open the database described by `config`, creating the tables if needed.
    ///
    /// # Errors
    /// Returns an error if the timezone is unknown or the database cannot be
    /// opened or initialized.
    pub fn open(config: &StoreConfig) -> Result<Self, Error> {
        let connection = match &config.db_path {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        }
        .inspect_err(|error| {
            tracing::error!("Could not open database {:?}: {error}", config.db_path)
        })?;

        Self::new(connection, &config.local_timezone)
    }

    /// Create a new [Store] from an existing SQLite connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the timezone is unknown or the database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        if current_offset(local_timezone).is_none() {
            tracing::error!("Unknown timezone \"{local_timezone}\"");
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            local_timezone: local_timezone.to_owned(),
        })
    }

    /// Validate and insert a new party.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the name, phone or address is blank.
    pub fn create_party(&self, new_party: &NewParty) -> Result<Party, Error> {
        let result = self.in_transaction(|connection| party::create_party(new_party, connection));

        match &result {
            Ok(party) => tracing::info!("Created party {party:?}"),
            Err(error) if error.is_validation_error() => {
                tracing::warn!("Could not create party from {new_party:?}: {error}")
            }
            Err(error) => tracing::error!("Could not create party from {new_party:?}: {error}"),
        }

        result
    }

    /// Get the party with the given ID.
    pub fn get_party(&self, party_id: PartyId) -> Result<Party, Error> {
        tracing::debug!("Getting party {party_id}");
        self.in_transaction(|connection| party::get_party(party_id, connection))
    }

    /// Get the first party named `name`.
    pub fn find_party_by_name(&self, name: &str) -> Result<Party, Error> {
        tracing::debug!("Searching for party named {name:?}");
        self.in_transaction(|connection| party::find_party_by_name(name, connection))
    }

    /// Get every party in the order they were created.
    pub fn get_all_parties(&self) -> Result<Vec<Party>, Error> {
        let parties = self.in_transaction(party::get_all_parties)?;
        tracing::debug!("Found {} parties", parties.len());

        Ok(parties)
    }

    /// Overwrite the phone, address and remark of the first party named `update.name`.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if the name, phone or address is blank and
    /// [Error::UpdateMissingParty] if there is no party with that name.
    pub fn update_party(&self, update: &PartyUpdate) -> Result<Party, Error> {
        let result = self.in_transaction(|connection| party::update_party(update, connection));

        match &result {
            Ok(party) => tracing::info!("Updated party {party:?}"),
            Err(error @ (Error::MissingField(_) | Error::UpdateMissingParty)) => {
                tracing::warn!("Could not update party with {update:?}: {error}")
            }
            Err(error) => tracing::error!("Could not update party with {update:?}: {error}"),
        }

        result
    }

    /// Delete the party with both the given ID and name.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingParty] if no party matches both.
    pub fn delete_party(&self, party_id: PartyId, name: &str) -> Result<(), Error> {
        let result =
            self.in_transaction(|connection| party::delete_party(party_id, name, connection));

        match &result {
            Ok(()) => tracing::info!("Deleted party {party_id} ({name:?})"),
            Err(Error::DeleteMissingParty) => {
                tracing::warn!("Tried to delete missing party {party_id} ({name:?})")
            }
            Err(error) => tracing::error!("Could not delete party {party_id}: {error}"),
        }

        result
    }

    /// Validate and record a new deal, stamped with the current local time.
    ///
    /// # Errors
    /// Returns [Error::MissingField] if any field other than the remark is missing.
    pub fn create_deal(&self, new_deal: &NewDeal) -> Result<Deal, Error> {
        let result = self.now().and_then(|timestamp| {
            self.in_transaction(|connection| deal::create_deal(new_deal, timestamp, connection))
        });

        match &result {
            Ok(deal) => tracing::info!("Created deal {deal:?}"),
            Err(error) if error.is_validation_error() => {
                tracing::warn!("Could not create deal from {new_deal:?}: {error}")
            }
            Err(error) => tracing::error!("Could not create deal from {new_deal:?}: {error}"),
        }

        result
    }

    /// Get the deal with the given ID.
    pub fn get_deal(&self, deal_id: DealId) -> Result<Deal, Error> {
        tracing::debug!("Getting deal {deal_id}");
        self.in_transaction(|connection| deal::get_deal(deal_id, connection))
    }

    /// Get every deal in the order they were recorded.
    pub fn get_all_deals(&self) -> Result<Vec<Deal>, Error> {
        let deals = self.in_transaction(deal::get_all_deals)?;
        tracing::debug!("Found {} deals", deals.len());

        Ok(deals)
    }

    fn now(&self) -> Result<OffsetDateTime, Error> {
        let offset = current_offset(&self.local_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.local_timezone.clone()))?;

        Ok(OffsetDateTime::now_utc().to_offset(offset))
    }

    fn in_transaction<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection.transaction()?;
        let value = operation(&transaction)?;
        transaction.commit()?;

        Ok(value)
    }
}

/// The current UTC offset of a canonical timezone, or `None` if the name is unknown.
fn current_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}
