//! # Validation Module
//!
//! Input validation and lenient numeric coercion for request payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end (browser)                                          │
//! │  └── Basic input collection, no business rules                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API boundary (apps/api)                                      │
//! │  ├── Type validation (serde deserialization of request schemas)        │
//! │  └── THIS MODULE: required fields, quantities, prices                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / Lifecycle Engine                                   │
//! │  └── Referential rules (store exists, store open, order status)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loosely-Typed Numbers
//! Browser forms send numbers as numbers, numeric strings, blanks or `null`.
//! [`coerce_number`] accepts all of these the same way the front-ends expect:
//! a blank string counts as `0`, a non-numeric string is "not a number".

use serde_json::Value;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present and not blank.
///
/// ## Example
/// ```rust
/// use tiendita_core::validation::validate_required;
///
/// assert!(validate_required("email", "alice@demo.com").is_ok());
/// assert!(validate_required("email", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a loosely-typed JSON value to a number.
///
/// | Input | Result |
/// |---|---|
/// | number | itself |
/// | numeric string (trimmed) | parsed |
/// | blank string, `null`, `false` | `0` |
/// | `true` | `1` |
/// | anything else | `None` |
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tiendita_core::validation::coerce_number;
///
/// assert_eq!(coerce_number(&json!(1.25)), Some(1.25));
/// assert_eq!(coerce_number(&json!(" 3 ")), Some(3.0));
/// assert_eq!(coerce_number(&json!("")), Some(0.0));
/// assert_eq!(coerce_number(&json!("abc")), None);
/// ```
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        Value::Null | Value::Bool(false) => Some(0.0),
        Value::Bool(true) => Some(1.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a loosely-typed JSON value to an entity id.
///
/// Only whole numbers that fit an id qualify; `"2"` and `2.0` do, `0`,
/// `-1`, `1.5` and `"abc"` do not.
pub fn coerce_id(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(_) | Value::String(_) => coerce_number(value)?,
        _ => return None,
    };
    if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Whether a JSON value is "falsy" in the sense the front-ends rely on for
/// defaulted fields: absent, `null`, `false`, `0` or an empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if !(1..=i64::from(MAX_ITEM_QUANTITY)).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }
    Ok(qty as u32)
}

/// Normalizes the quantity of an order line.
///
/// A missing or falsy quantity defaults to 1. Anything else must coerce to
/// a whole number accepted by [`validate_quantity`].
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use tiendita_core::validation::normalize_quantity;
///
/// assert_eq!(normalize_quantity(None), Ok(1));
/// assert_eq!(normalize_quantity(Some(&json!(0))), Ok(1));
/// assert_eq!(normalize_quantity(Some(&json!("2"))), Ok(2));
/// assert!(normalize_quantity(Some(&json!(-1))).is_err());
/// ```
pub fn normalize_quantity(raw: Option<&Value>) -> ValidationResult<u32> {
    let raw = match raw {
        Some(value) if !is_falsy(value) => value,
        _ => return Ok(1),
    };

    let qty = coerce_number(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "must be a number".to_string(),
    })?;

    if qty.fract() != 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number".to_string(),
        });
    }

    validate_quantity(qty as i64)
}

/// Largest accepted product price, in whole currency units.
pub const MAX_PRICE: i64 = 100_000_000;

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price.cents() > MAX_PRICE * 100 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
