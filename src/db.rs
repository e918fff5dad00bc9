//! Creates the tables for the domain models.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, deal::create_deal_table, party::create_party_table};

/// Create the party and deal tables if they do not already exist.
///
/// The tables are created in a single exclusive transaction, so either both
/// tables exist afterwards or neither does.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_party_table(&transaction)?;
    create_deal_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
