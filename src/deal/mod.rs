//! Deal records: a product sold by one party to another.

mod db;
mod domain;

pub use db::{create_deal, create_deal_table, get_all_deals, get_deal};
pub use domain::{Deal, DealDetails, DealId, NewDeal};
