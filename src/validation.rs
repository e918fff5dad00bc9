//! Required field checks shared by the record input types.
//!
//! A field is missing when it is absent, or when it is text that is empty
//! after trimming whitespace. Fields are checked in declaration order and the
//! first missing field is reported.

use crate::Error;

/// Return the trimmed text of a required field.
///
/// # Errors
///
/// Returns [Error::MissingField] with `field` if `value` is `None` or blank.
pub fn required_text<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, Error> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::MissingField(field)),
    }
}

/// Return the value of a required, non-text field.
///
/// # Errors
///
/// Returns [Error::MissingField] with `field` if `value` is `None`.
pub fn required_value<T: Copy>(field: &'static str, value: Option<T>) -> Result<T, Error> {
    value.ok_or(Error::MissingField(field))
}

/// Return the value of a required number field that must be finite.
///
/// # Errors
///
/// Returns [Error::MissingField] with `field` if `value` is `None` and
/// [Error::NotFinite] if it is NaN or infinite.
pub fn finite_value(field: &'static str, value: Option<f64>) -> Result<f64, Error> {
    let value = required_value(field, value)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NotFinite(field))
    }
}

/// Normalise an optional text field, blank text becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
