//! Converts records into JSON for responses.
//!
//! Each record type lists its public fields explicitly through [Record], so
//! the shape of the JSON only changes when that list does. A field whose
//! value cannot be written as JSON is replaced with `null` rather than
//! failing the whole record.

use serde_json::{Map, Number, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// A single column value of a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// Written as a JSON number.
    Integer(i64),
    /// Written as a JSON number, or `null` if it is NaN or infinite.
    Real(f64),
    /// Written as a JSON string.
    Text(&'a str),
    /// Written as an RFC 3339 string, or `null` if it cannot be formatted.
    Timestamp(OffsetDateTime),
    /// An absent optional value.
    Null,
}

impl<'a> From<Option<&'a str>> for Scalar<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Scalar::Null, Scalar::Text)
    }
}

/// A persisted record that can be sent to a client.
pub trait Record {
    /// The public fields of the record as `(name, value)` pairs, in the order
    /// they should appear in the output.
    fn fields(&self) -> Vec<(&'static str, Scalar<'_>)>;
}

/// Convert `record` into a JSON object keyed by field name.
pub fn to_json<R: Record>(record: &R) -> Value {
    let object = record
        .fields()
        .into_iter()
        .map(|(name, scalar)| (name.to_owned(), scalar_to_json(name, scalar)))
        .collect::<Map<String, Value>>();

    Value::Object(object)
}

/// Convert `records` into a JSON array of objects, in the same order.
pub fn to_json_list<R: Record>(records: &[R]) -> Value {
    Value::Array(records.iter().map(to_json).collect())
}

fn scalar_to_json(name: &str, scalar: Scalar) -> Value {
    match scalar {
        Scalar::Integer(integer) => Value::from(integer),
        Scalar::Real(real) => match Number::from_f64(real) {
            Some(number) => Value::Number(number),
            None => {
                tracing::warn!("Field {name} has the non-finite value {real}, sending null");
                Value::Null
            }
        },
        Scalar::Text(text) => Value::from(text),
        Scalar::Timestamp(timestamp) => match timestamp.format(&Rfc3339) {
            Ok(text) => Value::String(text),
            Err(error) => {
                tracing::warn!("Could not format field {name} ({timestamp}): {error}, sending null");
                Value::Null
            }
        },
        Scalar::Null => Value::Null,
    }
}
