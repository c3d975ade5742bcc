//! Helpers for decimal values persisted as SQLite text.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use tradejournal_core::errors::{Error, Result, ValidationError};

/// Parses a stored decimal, accepting scientific notation by way of `f64`.
///
/// Unparsable text is an error: a malformed amount must never be read as zero.
pub fn parse_decimal(value: &str, field_name: &str) -> Result<Decimal> {
    if let Ok(d) = Decimal::from_str(value) {
        return Ok(d);
    }
    if let Ok(d) = Decimal::from_scientific(value) {
        return Ok(d);
    }
    f64::from_str(value)
        .ok()
        .and_then(Decimal::from_f64)
        .ok_or_else(|| {
            log::error!("Malformed {} '{}' in storage", field_name, value);
            Error::Validation(ValidationError::InvalidInput(format!(
                "Malformed {} '{}'",
                field_name, value
            )))
        })
}

pub fn parse_optional_decimal(value: Option<&str>, field_name: &str) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(v, field_name)).transpose()
}

pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}
