//! Core deal domain types.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    DatabaseId, Error,
    party::PartyId,
    serialize::{Record, Scalar},
    validation::{finite_value, optional_text, required_text, required_value},
};

/// Database identifier for a deal.
pub type DealId = DatabaseId;

/// A record of `quantity` units of `product` sold by the seller to the buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    /// The ID assigned by the database.
    pub id: DealId,
    /// When the deal was recorded.
    pub timestamp: OffsetDateTime,
    /// The party buying the product.
    pub buyer_id: PartyId,
    /// The party selling the product.
    pub seller_id: PartyId,
    /// The name of the product.
    pub product: String,
    /// The price of a single unit.
    pub unit_price: f64,
    /// The number of units sold.
    pub quantity: i64,
    /// A free-text note.
    pub remark: Option<String>,
}

impl Record for Deal {
    fn fields(&self) -> Vec<(&'static str, Scalar<'_>)> {
        vec![
            ("id", Scalar::Integer(self.id)),
            ("timestamp", Scalar::Timestamp(self.timestamp)),
            ("buyer_id", Scalar::Integer(self.buyer_id)),
            ("seller_id", Scalar::Integer(self.seller_id)),
            ("product", Scalar::Text(&self.product)),
            ("unit_price", Scalar::Real(self.unit_price)),
            ("quantity", Scalar::Integer(self.quantity)),
            ("remark", Scalar::from(self.remark.as_deref())),
        ]
    }
}

/// Form data for recording a deal.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewDeal {
    /// The ID of the buying party, required.
    pub buyer_id: Option<PartyId>,
    /// The ID of the selling party, required.
    pub seller_id: Option<PartyId>,
    /// The product name, required.
    pub product: Option<String>,
    /// The price of a single unit, required.
    pub unit_price: Option<f64>,
    /// The number of units, required.
    pub quantity: Option<i64>,
    /// A free-text note.
    pub remark: Option<String>,
}

/// Deal fields that have passed validation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct DealDetails {
    pub buyer_id: PartyId,
    pub seller_id: PartyId,
    pub product: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub remark: Option<String>,
}

impl NewDeal {
    /// Check that every field except the remark is filled in.
    ///
    /// The party IDs are not checked against the party table.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first required field that is
    /// absent or blank, and [Error::NotFinite] if the unit price is NaN or
    /// infinite.
    pub fn validate(&self) -> Result<DealDetails, Error> {
        let buyer_id = required_value("buyer_id", self.buyer_id)?;
        let seller_id = required_value("seller_id", self.seller_id)?;
        let product = required_text("product", self.product.as_deref())?;
        let unit_price = finite_value("unit_price", self.unit_price)?;
        let quantity = required_value("quantity", self.quantity)?;

        Ok(DealDetails {
            buyer_id,
            seller_id,
            product: product.to_owned(),
            unit_price,
            quantity,
            remark: optional_text(self.remark.as_deref()),
        })
    }
}

impl DealDetails {
    /// Describe the ways in which this deal looks wrong but is still allowed.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.buyer_id == self.seller_id {
            warnings.push("the buyer and seller are the same party");
        }

        if self.unit_price < 0.0 {
            warnings.push("the unit price is negative");
        }

        if self.quantity < 0 {
            warnings.push("the quantity is negative");
        }

        warnings
    }
}
