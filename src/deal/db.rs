//! Database operations for deals.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    deal::{Deal, DealId, NewDeal},
};

const SELECT_DEAL: &str =
    "SELECT id, timestamp, buyer_id, seller_id, product, unit_price, quantity, remark FROM deal";

/// Validate `new_deal`, insert it with `timestamp` and return it with its
/// generated ID.
///
/// The buyer and seller IDs are stored as given, they are not checked
/// against the party table.
///
/// # Errors
///
/// Returns [Error::MissingField] if any field other than the remark is
/// missing, in which case nothing is written.
pub fn create_deal(
    new_deal: &NewDeal,
    timestamp: OffsetDateTime,
    connection: &Connection,
) -> Result<Deal, Error> {
    let details = new_deal.validate()?;

    for warning in details.warnings() {
        tracing::warn!("Recording deal {details:?} even though {warning}");
    }

    connection.execute(
        "INSERT INTO deal (timestamp, buyer_id, seller_id, product, unit_price, quantity, remark)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        (
            timestamp,
            details.buyer_id,
            details.seller_id,
            &details.product,
            details.unit_price,
            details.quantity,
            &details.remark,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Deal {
        id,
        timestamp,
        buyer_id: details.buyer_id,
        seller_id: details.seller_id,
        product: details.product,
        unit_price: details.unit_price,
        quantity: details.quantity,
        remark: details.remark,
    })
}

/// Retrieve a single deal by ID.
pub fn get_deal(deal_id: DealId, connection: &Connection) -> Result<Deal, Error> {
    connection
        .prepare(&format!("{SELECT_DEAL} WHERE id = :id;"))?
        .query_row(&[(":id", &deal_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all deals in the order they were recorded.
pub fn get_all_deals(connection: &Connection) -> Result<Vec<Deal>, Error> {
    connection
        .prepare(&format!("{SELECT_DEAL} ORDER BY id ASC;"))?
        .query_map([], map_row)?
        .map(|maybe_deal| maybe_deal.map_err(|error| error.into()))
        .collect()
}

/// Initialize the deal table and indexes.
///
/// `buyer_id` and `seller_id` refer to parties but are deliberately left
/// without a foreign key constraint.
pub fn create_deal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS deal (
            id INTEGER PRIMARY KEY,
            timestamp TEXT NOT NULL,
            buyer_id INTEGER NOT NULL,
            seller_id INTEGER NOT NULL,
            product TEXT NOT NULL,
            unit_price REAL NOT NULL,
            quantity INTEGER NOT NULL,
            remark TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_deal_buyer_id ON deal(buyer_id);
        CREATE INDEX IF NOT EXISTS idx_deal_seller_id ON deal(seller_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Deal, rusqlite::Error> {
    Ok(Deal {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        buyer_id: row.get(2)?,
        seller_id: row.get(3)?,
        product: row.get(4)?,
        unit_price: row.get(5)?,
        quantity: row.get(6)?,
        remark: row.get(7)?,
    })
}
