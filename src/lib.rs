//! Ledger is the record keeping core of a small bookkeeping web app.
//!
//! It stores parties (the people and businesses you trade with) and deals
//! (products sold by one party to another) in a SQLite database, validates
//! form input before anything is written, and converts stored records into
//! JSON for responses. Routing and page rendering are left to the web app.
//!
//! Most callers open a [Store] once and share clones of it between request
//! handlers:
//!
//! ```
//! use ledger_rs::{NewParty, Store, StoreConfig, to_json};
//!
//! let store = Store::open(&StoreConfig::default()).unwrap();
//! let party = store
//!     .create_party(&NewParty {
//!         name: Some("Alice".to_owned()),
//!         phone: Some("123".to_owned()),
//!         address: Some("Addr1".to_owned()),
//!         remark: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(to_json(&party)["name"], "Alice");
//! ```

#![warn(missing_docs)]

mod config;
mod db;
mod deal;
mod error;
mod logging;
mod party;
mod serialize;
mod store;
mod validation;

pub use config::{DEFAULT_TIMEZONE, StoreConfig};
pub use db::initialize as initialize_db;
pub use deal::{
    Deal, DealDetails, DealId, NewDeal, create_deal, create_deal_table, get_all_deals, get_deal,
};
pub use error::Error;
pub use logging::setup_logging;
pub use party::{
    NewParty, Party, PartyDetails, PartyId, PartyUpdate, create_party, create_party_table,
    delete_party, find_party_by_name, get_all_parties, get_party, update_party,
};
pub use serialize::{Record, Scalar, to_json, to_json_list};
pub use store::Store;

/// The integer type of the IDs SQLite assigns to records.
pub type DatabaseId = i64;
