//! Party records: the people and businesses that buy and sell in deals.

mod db;
mod domain;

pub use db::{
    create_party, create_party_table, delete_party, find_party_by_name, get_all_parties,
    get_party, update_party,
};
pub use domain::{NewParty, Party, PartyDetails, PartyId, PartyUpdate};
