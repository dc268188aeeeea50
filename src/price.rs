//! Decimal (European) prices and the probabilities they imply.
//!
//! A decimal price `d` returns `d × stake` on success, so the probability it encodes, ignoring
//! any bookmaker margin, is `1/d`. Prices at or below 1 carry no information and are rejected
//! rather than clamped.

use crate::error::{require, InvalidInput};

/// Anything that can be quoted as a decimal price.
pub trait MarketPrice {
    fn decimal(&self) -> f64;
}

impl MarketPrice for f64 {
    fn decimal(&self) -> f64 {
        *self
    }
}

/// Validates a decimal price for the named `field`: finite and strictly greater than 1.
pub fn validate_odds(field: &'static str, odds: f64) -> Result<f64, InvalidInput> {
    require(field, "> 1", odds, |odds| odds > 1.0)
}

/// The implied probability `1/odds`.
///
/// # Errors
/// [InvalidInput] if `odds` is non-finite or not strictly greater than 1.
pub fn implied_probability(odds: impl MarketPrice) -> Result<f64, InvalidInput> {
    let odds = validate_odds("odds", odds.decimal())?;
    Ok(1.0 / odds)
}

/// Implied probabilities of every price in `prices`, failing on the first invalid price.
pub fn implied_probabilities<P: MarketPrice>(prices: &[P]) -> Result<Vec<f64>, InvalidInput> {
    prices.iter().map(|price| implied_probability(price.decimal())).collect()
}
