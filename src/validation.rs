//! Field-level rules shared by the entity inputs.
//!
//! Each input type lists its fields explicitly and runs them through these
//! checks before anything reaches the store.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::HrError;

pub const MIN_YEAR: i64 = 2000;
pub const MAX_YEAR: i64 = 2100;

/// Upper bound of the small day counters.
pub const MAX_DAY_COUNT: i64 = 32_767;

/// Amounts carry at most 10 digits, 2 of them after the point.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;
const AMOUNT_MAX_DIGITS: u32 = 10;

pub fn required_text(field: &str, value: &str, max_len: Option<usize>) -> Result<String, HrError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HrError::validation(field, "This field is required"));
    }
    check_length(field, value, max_len)?;
    Ok(value.to_string())
}

/// Blank text counts as absent.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Result<Option<String>, HrError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            check_length(field, v, max_len)?;
            Ok(Some(v.to_string()))
        }
    }
}

fn check_length(field: &str, value: &str, max_len: Option<usize>) -> Result<(), HrError> {
    match max_len {
        Some(max) if value.chars().count() > max => Err(HrError::validation(
            field,
            format!("Ensure this value has at most {} characters", max),
        )),
        _ => Ok(()),
    }
}

pub fn year(value: i64) -> Result<i32, HrError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
        return Err(HrError::validation(
            "year",
            format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
        ));
    }
    Ok(value as i32)
}

/// Parses a year that arrived as text, e.g. from a query string.
pub fn year_text(value: &str) -> Result<i32, HrError> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| HrError::validation("year", "Enter a whole number"))?;
    year(parsed)
}

pub fn day_count(field: &str, value: i64) -> Result<u32, HrError> {
    if value < 0 {
        return Err(HrError::validation(field, "must not be negative"));
    }
    if value > MAX_DAY_COUNT {
        return Err(HrError::validation(
            field,
            format!("must be at most {}", MAX_DAY_COUNT),
        ));
    }
    Ok(value as u32)
}

/// Reads a whole number sent either as a JSON number or as numeric text.
///
/// `null` and blank text count as absent.
pub fn integer(field: &str, value: &Value) -> Result<Option<i64>, HrError> {
    let invalid = || HrError::validation(field, "A valid integer is required");
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_i64().map(Some).ok_or_else(invalid),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub fn required_integer(field: &str, value: &Value) -> Result<i64, HrError> {
    integer(field, value)?.ok_or_else(|| HrError::validation(field, "This field is required"))
}

/// Reads a decimal sent either as a JSON number or as numeric text.
pub fn decimal(field: &str, value: &Value) -> Result<Option<Decimal>, HrError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(HrError::validation(field, "A valid number is required")),
    };
    Decimal::from_str(&text)
        .map(Some)
        .map_err(|_| HrError::validation(field, "A valid number is required"))
}

/// Validates a currency amount and rescales it to two decimal places.
pub fn amount(field: &str, value: Decimal) -> Result<Decimal, HrError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(HrError::validation(field, "must not be negative"));
    }
    if value.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        return Err(HrError::validation(
            field,
            format!(
                "Ensure that there are no more than {} decimal places",
                AMOUNT_DECIMAL_PLACES
            ),
        ));
    }
    let whole_digits_limit = Decimal::from(10i64.pow(AMOUNT_MAX_DIGITS - AMOUNT_DECIMAL_PLACES));
    if value >= whole_digits_limit {
        return Err(HrError::validation(
            field,
            format!(
                "Ensure that there are no more than {} digits in total",
                AMOUNT_MAX_DIGITS
            ),
        ));
    }

    let mut value = value.abs();
    value.rescale(AMOUNT_DECIMAL_PLACES);
    Ok(value)
}
