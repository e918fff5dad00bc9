//! Core party domain types.

use serde::Deserialize;

use crate::{
    DatabaseId, Error,
    serialize::{Record, Scalar},
    validation::{optional_text, required_text},
};

/// Database identifier for a party.
pub type PartyId = DatabaseId;

/// A person or business that can act as the buyer or seller in a deal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Party {
    /// The ID assigned by the database.
    pub id: PartyId,
    /// The party's name.
    ///
    /// Names are used to look parties up but uniqueness is not enforced.
    pub name: String,
    /// A contact phone number.
    pub phone: String,
    /// A postal or street address.
    pub address: String,
    /// A free-text note.
    pub remark: Option<String>,
}

impl Record for Party {
    fn fields(&self) -> Vec<(&'static str, Scalar<'_>)> {
        vec![
            ("id", Scalar::Integer(self.id)),
            ("name", Scalar::Text(&self.name)),
            ("phone", Scalar::Text(&self.phone)),
            ("address", Scalar::Text(&self.address)),
            ("remark", Scalar::from(self.remark.as_deref())),
        ]
    }
}

/// Form data for creating a party.
///
/// Every field is optional so that a form with missing fields can still be
/// decoded and then rejected with a useful error by [NewParty::validate].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewParty {
    /// The party's name, required.
    pub name: Option<String>,
    /// A contact phone number, required.
    pub phone: Option<String>,
    /// A postal or street address, required.
    pub address: Option<String>,
    /// A free-text note.
    pub remark: Option<String>,
}

/// Form data for updating the contact details of a party.
///
/// `name` selects the party to update, the name itself is never changed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PartyUpdate {
    /// The name of the party to update, required.
    pub name: Option<String>,
    /// The new phone number, required.
    pub phone: Option<String>,
    /// The new address, required.
    pub address: Option<String>,
    /// The new remark, a missing remark clears the old one.
    pub remark: Option<String>,
}

/// Party fields that have passed validation.
///
/// Text fields are trimmed and a blank remark is `None`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct PartyDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub remark: Option<String>,
}

impl NewParty {
    /// Check that the name, phone and address are filled in.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first required field that is
    /// absent or blank.
    pub fn validate(&self) -> Result<PartyDetails, Error> {
        validate_details(
            self.name.as_deref(),
            self.phone.as_deref(),
            self.address.as_deref(),
            self.remark.as_deref(),
        )
    }
}

impl PartyUpdate {
    /// Check that the name used for the look up and the new phone and address
    /// are filled in.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first required field that is
    /// absent or blank.
    pub fn validate(&self) -> Result<PartyDetails, Error> {
        validate_details(
            self.name.as_deref(),
            self.phone.as_deref(),
            self.address.as_deref(),
            self.remark.as_deref(),
        )
    }
}

fn validate_details(
    name: Option<&str>,
    phone: Option<&str>,
    address: Option<&str>,
    remark: Option<&str>,
) -> Result<PartyDetails, Error> {
    let name = required_text("name", name)?;
    let phone = required_text("phone", phone)?;
    let address = required_text("address", address)?;

    Ok(PartyDetails {
        name: name.to_owned(),
        phone: phone.to_owned(),
        address: address.to_owned(),
        remark: optional_text(remark),
    })
}
