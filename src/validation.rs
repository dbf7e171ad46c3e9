//! Submission payload validation
//!
//! Pure checks over the raw JSON payload; nothing here touches the store.
//! Checks run in a fixed order (missing fields, then numerics, then side)
//! and the first failure is returned.

use serde_json::{Map, Value};

use crate::error::{LedgerError, LedgerResult};
use crate::trade::{TradeSide, TradeSubmission};

/// Fields that must be present, in the order they are checked
const REQUIRED_FIELDS: [&str; 5] = ["user_id", "ticker", "side", "price", "volume"];

/// Validate a raw submission payload into a typed submission
pub fn validate_submission(payload: &Value) -> LedgerResult<TradeSubmission> {
    let object: &Map<String, Value> = match payload.as_object() {
        Some(object) => object,
        // A non-object payload carries no fields at all.
        None => {
            return Err(LedgerError::MissingField {
                field: REQUIRED_FIELDS[0],
            });
        }
    };

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(LedgerError::MissingField { field });
        }
    }

    let price = positive_number(object, "price")?;
    let volume = positive_integer(object, "volume")?;

    let side = match object["side"].as_str() {
        Some("buy") => TradeSide::Buy,
        Some("sell") => TradeSide::Sell,
        _ => {
            return Err(LedgerError::InvalidEnum {
                field: "side",
                expected: "must be \"buy\" or \"sell\"",
            });
        }
    };

    let user_id = string_field(object, "user_id")?;
    let ticker = string_field(object, "ticker")?;

    Ok(TradeSubmission {
        user_id,
        ticker,
        side,
        price,
        volume,
    })
}

fn positive_number(object: &Map<String, Value>, field: &'static str) -> LedgerResult<f64> {
    match object[field].as_f64() {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(LedgerError::InvalidNumeric { field }),
    }
}

fn positive_integer(object: &Map<String, Value>, field: &'static str) -> LedgerResult<i64> {
    let value = &object[field];
    if let Some(volume) = value.as_i64() {
        if volume > 0 {
            return Ok(volume);
        }
        return Err(LedgerError::InvalidNumeric { field });
    }
    // Integral floats conform to the quantity type; fractional ones do not.
    if let Some(raw) = value.as_f64() {
        if raw > 0.0 && raw.fract() == 0.0 && raw < i64::MAX as f64 {
            return Ok(raw as i64);
        }
    }
    Err(LedgerError::InvalidNumeric { field })
}

fn string_field(object: &Map<String, Value>, field: &'static str) -> LedgerResult<String> {
    object[field]
        .as_str()
        .map(str::to_owned)
        .ok_or(LedgerError::InvalidEnum {
            field,
            expected: "must be a string",
        })
}
