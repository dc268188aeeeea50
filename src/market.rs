//! Overround (booksum) and margin of a market of mutually exclusive outcomes.

use crate::error::InvalidInput;
use crate::price::{implied_probabilities, MarketPrice};
use crate::probs::SliceExt;

/// The fewest outcomes a market can have.
pub const MIN_OUTCOMES: usize = 2;

fn require_outcomes<P>(prices: &[P]) -> Result<(), InvalidInput> {
    if prices.len() < MIN_OUTCOMES {
        return Err(InvalidInput::TooFew {
            field: "prices",
            min: MIN_OUTCOMES,
            actual: prices.len(),
        });
    }
    Ok(())
}

/// The sum of the implied probabilities of `prices`. A fair book sums to exactly 1; anything above
/// is the bookmaker's structural edge.
pub fn overround<P: MarketPrice>(prices: &[P]) -> Result<f64, InvalidInput> {
    require_outcomes(prices)?;
    Ok(implied_probabilities(prices)?.sum())
}

/// The margin `(overround - 1) × 100`, in percent.
pub fn margin_percent<P: MarketPrice>(prices: &[P]) -> Result<f64, InvalidInput> {
    Ok((overround(prices)? - 1.0) * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub value: f64,
}
impl Overround {
    pub fn margin_percent(&self) -> f64 {
        (self.value - 1.0) * 100.0
    }
}

/// A market with its margin removed using the multiplicative method: every implied probability
/// is scaled by the same factor so that the book sums to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub probs: Vec<f64>,
    pub prices: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    pub fn fit(prices: Vec<f64>) -> Result<Self, InvalidInput> {
        require_outcomes(&prices)?;
        let mut probs = implied_probabilities(&prices)?;
        let overround = probs.normalise(1.0);
        Ok(Self {
            probs,
            prices,
            overround: Overround { value: overround },
        })
    }

    /// Prices that would be quoted on a zero-margin book.
    pub fn fair_prices(&self) -> Vec<f64> {
        self.probs.iter().map(|prob| 1.0 / prob).collect()
    }
}
