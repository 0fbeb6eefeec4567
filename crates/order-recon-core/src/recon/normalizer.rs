//! Identifier and quantity normalization.
//!
//! Handles:
//! - NDC canonicalization (digits only, 11-digit zero-padding)
//! - Quantity coercion (unparseable values fall back to 0)

use tracing::warn;

/// Canonicalize a National Drug Code.
///
/// Drops everything but ASCII digits (covering ordinary and non-breaking
/// whitespace, hyphens and any other separators) and left-pads the rest with
/// zeros to exactly 11 characters. Inputs with more than 11 digits pass
/// through unpadded and untruncated. Empty input stays empty.
pub fn normalize_ndc(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("{:0>11}", digits)
}

/// Coerce an order quantity to a number.
///
/// Any value that fails numeric parsing becomes 0 rather than an error.
/// Empty cells coerce silently; non-empty garbage is warn-logged so bad
/// source data stays visible without failing the run.
pub fn coerce_quantity(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed.parse::<f64>() {
        Ok(quantity) => quantity,
        Err(_) => {
            warn!(value = %raw, "unparseable quantity coerced to 0");
            0.0
        }
    }
}
