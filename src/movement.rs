//! Line movement between an opening and a closing (or current) set of prices.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::InvalidInput;
use crate::market::MIN_OUTCOMES;
use crate::price::implied_probability;

/// Slack absorbing representation error in price differences, so that 2.00 → 2.01 and
/// 1.90 → 1.91 both count as a change of exactly one tick.
pub const PRICE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Absolute price change below which an outcome is considered unchanged. A change equal to
    /// the tolerance, to within [PRICE_EPSILON], counts as a move.
    pub unchanged_tolerance: f64,

    /// Implied-probability move, in percentage points, at or above which a move is elevated.
    pub elevated_move: f64,

    /// Implied-probability move, in percentage points, at or above which a move is large.
    pub large_move: f64,
}
impl MovementConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..).contains(&self.unchanged_tolerance) {
            bail!("unchanged tolerance must be non-negative")
        }
        if self.elevated_move > self.large_move {
            bail!("elevated move threshold cannot exceed the large move threshold")
        }
        Ok(())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            unchanged_tolerance: 0.01,
            elevated_move: 2.0,
            large_move: 3.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Direction {
    /// Odds decreased: the market strengthened on the outcome.
    Shortened,
    /// Odds increased: the market weakened on the outcome.
    Drifted,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Intensity {
    Small,
    Elevated,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMove {
    /// Largest absolute implied-probability change across outcomes, in percentage points.
    pub max_delta: f64,

    /// Per-outcome absolute implied-probability change, in percentage points.
    pub deltas: Vec<f64>,
    pub directions: Vec<Direction>,

    /// Index of the outcome with the shortest closing price.
    pub favourite: usize,
}
impl LineMove {
    pub fn intensity(&self, config: &MovementConfig) -> Intensity {
        if self.max_delta >= config.large_move {
            Intensity::Large
        } else if self.max_delta >= config.elevated_move {
            Intensity::Elevated
        } else {
            Intensity::Small
        }
    }
}

/// Compares `open` against `close` outcome by outcome.
///
/// # Errors
/// [InvalidInput] if the two sets differ in length, have fewer than two outcomes, or contain an
/// invalid price.
pub fn line_move(
    open: &[f64],
    close: &[f64],
    config: &MovementConfig,
) -> Result<LineMove, InvalidInput> {
    if open.len() != close.len() {
        return Err(InvalidInput::Misaligned {
            left: "open odds",
            right: "close odds",
            left_len: open.len(),
            right_len: close.len(),
        });
    }
    if close.len() < MIN_OUTCOMES {
        return Err(InvalidInput::TooFew {
            field: "prices",
            min: MIN_OUTCOMES,
            actual: close.len(),
        });
    }

    let mut deltas = Vec::with_capacity(close.len());
    let mut directions = Vec::with_capacity(close.len());
    let mut favourite = 0;
    for (index, (&open, &close_price)) in open.iter().zip(close).enumerate() {
        let delta = (implied_probability(close_price)? - implied_probability(open)?).abs() * 100.0;
        deltas.push(delta);

        let change = close_price - open;
        directions.push(if change.abs() < config.unchanged_tolerance - PRICE_EPSILON {
            Direction::Unchanged
        } else if change < 0.0 {
            Direction::Shortened
        } else {
            Direction::Drifted
        });

        if close_price < close[favourite] {
            favourite = index;
        }
    }
    let max_delta = deltas.iter().copied().fold(0.0, f64::max);
    Ok(LineMove {
        max_delta,
        deltas,
        directions,
        favourite,
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::testing::assert_slice_f64_relative;

    #[test]
    fn two_way_move() {
        let moved = line_move(&[1.90, 1.90], &[1.75, 2.10], &MovementConfig::default()).unwrap();
        assert_slice_f64_relative(&[4.5113, 5.0125], &moved.deltas, 0.0001);
        assert_float_absolute_eq!((1.0 / 1.90 - 1.0 / 2.10) * 100.0, moved.max_delta, 1e-9);
        assert_eq!(vec![Direction::Shortened, Direction::Drifted], moved.directions);
        assert_eq!(0, moved.favourite);
        assert_eq!(Intensity::Large, moved.intensity(&MovementConfig::default()));
    }

    #[test]
    fn three_way_unchanged_draw() {
        let config = MovementConfig::default();
        let moved = line_move(&[2.50, 3.20, 2.90], &[2.70, 3.205, 2.75], &config).unwrap();
        assert_eq!(
            vec![Direction::Drifted, Direction::Unchanged, Direction::Shortened],
            moved.directions
        );
        assert_eq!(0, moved.favourite);
        assert_float_absolute_eq!((1.0 / 2.50 - 1.0 / 2.70) * 100.0, moved.max_delta, 1e-9);
        assert_eq!(Intensity::Elevated, moved.intensity(&MovementConfig::default()));
    }

    #[test]
    fn no_move() {
        let moved = line_move(&[1.85, 1.95], &[1.85, 1.95], &MovementConfig::default()).unwrap();
        assert_eq!(0.0, moved.max_delta);
        assert_eq!(vec![Direction::Unchanged; 2], moved.directions);
        assert_eq!(Intensity::Small, moved.intensity(&MovementConfig::default()));
    }

    #[test]
    fn unchanged_tolerance_boundary() {
        let config = MovementConfig::default();
        let direction = |close: f64| {
            line_move(&[2.00, 2.00], &[close, 2.00], &config).unwrap().directions[0]
        };
        assert_eq!(Direction::Drifted, direction(2.02));
        assert_eq!(Direction::Drifted, direction(2.01));
        assert_eq!(Direction::Shortened, direction(1.99));
        assert_eq!(Direction::Unchanged, direction(2.0099));
        assert_eq!(Direction::Unchanged, direction(1.9901));
        assert_eq!(Direction::Unchanged, direction(2.005));

        // 1.91 - 1.90 and 2.01 - 2.00 land either side of 0.01 in binary; both are one tick
        let moved = line_move(&[1.90, 2.00], &[1.91, 2.01], &config).unwrap();
        assert_eq!(vec![Direction::Drifted, Direction::Drifted], moved.directions);
    }

    #[test]
    fn rejects_misaligned_and_short() {
        let config = MovementConfig::default();
        assert_eq!(
            Err(InvalidInput::Misaligned {
                left: "open odds",
                right: "close odds",
                left_len: 2,
                right_len: 3
            }),
            line_move(&[1.9, 1.9], &[2.5, 3.2, 2.9], &config)
        );
        assert!(matches!(
            line_move(&[1.9], &[1.8], &config),
            Err(InvalidInput::TooFew { .. })
        ));
        assert!(line_move(&[1.9, 1.0], &[1.8, 2.0], &config).is_err());
    }
}
