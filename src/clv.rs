//! Closing-line value: how the price obtained at bet time compares with the market's closing
//! price, independent of the bet's result.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::InvalidInput;
use crate::price::validate_odds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClvConfig {
    /// Probability-space CLV, in percentage points, at which a bet is deemed clearly
    /// favourable (above `threshold`) or clearly unfavourable (at or below `-threshold`).
    pub threshold: f64,
}
impl ClvConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            bail!("CLV threshold must be positive")
        }
        Ok(())
    }
}

impl Default for ClvConfig {
    fn default() -> Self {
        Self { threshold: 0.6 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClvBand {
    Favourable,
    SlightlyFavourable,
    Neutral,
    Unfavourable,
}
impl ClvBand {
    /// Step function of the probability-space CLV `prob_clv`.
    pub fn classify(prob_clv: f64, config: &ClvConfig) -> Self {
        if prob_clv > config.threshold {
            Self::Favourable
        } else if prob_clv > 0.0 {
            Self::SlightlyFavourable
        } else if prob_clv > -config.threshold {
            Self::Neutral
        } else {
            Self::Unfavourable
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosingLineValue {
    /// `(close - bet) / close × 100`, in percent.
    pub price_clv: f64,

    /// `(1/close - 1/bet) × 100`, in percentage points.
    pub prob_clv: f64,
    pub band: ClvBand,
}

pub fn closing_line_value(
    bet_odds: f64,
    close_odds: f64,
    config: &ClvConfig,
) -> Result<ClosingLineValue, InvalidInput> {
    let bet_odds = validate_odds("bet odds", bet_odds)?;
    let close_odds = validate_odds("close odds", close_odds)?;
    let price_clv = (close_odds - bet_odds) / close_odds * 100.0;
    let prob_clv = (1.0 / close_odds - 1.0 / bet_odds) * 100.0;
    Ok(ClosingLineValue {
        price_clv,
        prob_clv,
        band: ClvBand::classify(prob_clv, config),
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn beat_the_close() {
        let clv = closing_line_value(2.05, 1.92, &ClvConfig::default()).unwrap();
        assert_float_absolute_eq!((1.92 - 2.05) / 1.92 * 100.0, clv.price_clv, EPSILON);
        assert_float_absolute_eq!(-6.7708, clv.price_clv, 0.0001);
        assert_float_absolute_eq!(3.3028, clv.prob_clv, 0.0001);
        assert_eq!(ClvBand::Favourable, clv.band);
    }

    #[test]
    fn missed_the_close() {
        let clv = closing_line_value(1.80, 1.95, &ClvConfig::default()).unwrap();
        assert!(clv.price_clv > 0.0);
        assert!(clv.prob_clv < -0.6);
        assert_eq!(ClvBand::Unfavourable, clv.band);
    }

    #[test]
    fn unchanged_price_is_neutral() {
        let clv = closing_line_value(2.0, 2.0, &ClvConfig::default()).unwrap();
        assert_eq!(0.0, clv.price_clv);
        assert_eq!(0.0, clv.prob_clv);
        assert_eq!(ClvBand::Neutral, clv.band);
    }

    #[test]
    fn classify_boundaries() {
        let config = ClvConfig::default();
        assert_eq!(ClvBand::Favourable, ClvBand::classify(0.6 + EPSILON, &config));
        assert_eq!(ClvBand::SlightlyFavourable, ClvBand::classify(0.6, &config));
        assert_eq!(ClvBand::SlightlyFavourable, ClvBand::classify(0.6 - EPSILON, &config));
        assert_eq!(ClvBand::SlightlyFavourable, ClvBand::classify(EPSILON, &config));
        assert_eq!(ClvBand::Neutral, ClvBand::classify(0.0, &config));
        assert_eq!(ClvBand::Neutral, ClvBand::classify(-EPSILON, &config));
        assert_eq!(ClvBand::Neutral, ClvBand::classify(-0.6 + EPSILON, &config));
        assert_eq!(ClvBand::Unfavourable, ClvBand::classify(-0.6, &config));
        assert_eq!(ClvBand::Unfavourable, ClvBand::classify(-0.6 - EPSILON, &config));
    }

    #[test]
    fn classify_custom_threshold() {
        let config = ClvConfig { threshold: 1.0 };
        assert_eq!(ClvBand::SlightlyFavourable, ClvBand::classify(0.8, &config));
        assert_eq!(ClvBand::Neutral, ClvBand::classify(-0.8, &config));
    }

    #[test]
    fn rejects_invalid_odds() {
        let config = ClvConfig::default();
        assert!(closing_line_value(1.0, 1.9, &config).is_err());
        assert!(closing_line_value(1.9, 0.0, &config).is_err());
        assert!(matches!(
            closing_line_value(f64::NAN, 1.9, &config),
            Err(InvalidInput::NonFinite { field: "bet odds", .. })
        ));
    }
}
