//! Pre-bet risk briefing: a 0 to 100 score blending the current margin, the size of the line move
//! since open, and the depth of the market. A high score calls for caution; it is not a
//! prediction of the result.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::InvalidInput;
use crate::market::{margin_percent, MIN_OUTCOMES};
use crate::movement::{line_move, MovementConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Liquidity {
    Major,
    Mid,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Flag {
    HighMargin,
    LowMargin,
    MarginUnmeasured,
    ElevatedMove,
    LargeMove,
    MoveUnmeasured,
    ThinLiquidity,
    DeepLiquidity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    pub base_score: f64,
    pub margin_weight: f64,
    pub max_margin_score: f64,
    pub move_weight: f64,
    pub max_move_score: f64,
    pub major_score: f64,
    pub mid_score: f64,
    pub minor_score: f64,

    /// Margin, in percent, at or above which the market is flagged as expensive.
    pub high_margin: f64,

    /// Margin, in percent, at or below which the market is flagged as cheap.
    pub low_margin: f64,
}
impl BriefingConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.low_margin > self.high_margin {
            bail!("low margin threshold cannot exceed the high margin threshold")
        }
        if !(0.0..).contains(&self.max_margin_score) || !(0.0..).contains(&self.max_move_score) {
            bail!("score caps must be non-negative")
        }
        Ok(())
    }

    fn liquidity_score(&self, liquidity: Liquidity) -> f64 {
        match liquidity {
            Liquidity::Major => self.major_score,
            Liquidity::Mid => self.mid_score,
            Liquidity::Minor => self.minor_score,
        }
    }
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            base_score: 10.0,
            margin_weight: 6.0,
            max_margin_score: 45.0,
            move_weight: 8.0,
            max_move_score: 35.0,
            major_score: 4.0,
            mid_score: 10.0,
            minor_score: 18.0,
            high_margin: 6.0,
            low_margin: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Briefing {
    pub score: u8,
    pub level: RiskLevel,

    /// Margin of the current prices, in percent, if there were enough of them.
    pub margin: Option<f64>,

    /// Largest implied-probability move since open, in percentage points, if opening prices
    /// were supplied.
    pub max_move: Option<f64>,
    pub flags: Vec<Flag>,
}

impl RiskLevel {
    pub fn classify(score: u8) -> Self {
        match score {
            80.. => Self::VeryHigh,
            60..=79 => Self::High,
            40..=59 => Self::Moderate,
            _ => Self::Low,
        }
    }
}

/// Briefs on a market given its `current` prices and, optionally, its `open` prices.
///
/// Fewer than two current prices leave the margin unmeasured; missing or misaligned opening
/// prices leave the move unmeasured. Neither is an error.
///
/// # Errors
/// [InvalidInput] if any supplied price is invalid or `config` fails validation.
pub fn brief(
    open: Option<&[f64]>,
    current: &[f64],
    liquidity: Liquidity,
    movement: &MovementConfig,
    config: &BriefingConfig,
) -> Result<Briefing, InvalidInput> {
    config.validate().map_err(InvalidInput::config)?;
    let mut flags = vec![];
    let mut score = config.base_score;

    let margin = if current.len() >= MIN_OUTCOMES {
        Some(margin_percent(current)?)
    } else {
        None
    };
    match margin {
        Some(margin) => {
            score += (margin * config.margin_weight).clamp(0.0, config.max_margin_score);
            if margin >= config.high_margin {
                flags.push(Flag::HighMargin);
            }
            if margin <= config.low_margin {
                flags.push(Flag::LowMargin);
            }
        }
        None => flags.push(Flag::MarginUnmeasured),
    }

    let max_move = match open {
        Some(open) if open.len() == current.len() && current.len() >= MIN_OUTCOMES => {
            Some(line_move(open, current, movement)?.max_delta)
        }
        _ => None,
    };
    match max_move {
        Some(max_move) => {
            score += (max_move * config.move_weight).clamp(0.0, config.max_move_score);
            if max_move >= movement.elevated_move {
                flags.push(Flag::ElevatedMove);
            }
            if max_move >= movement.large_move {
                flags.push(Flag::LargeMove);
            }
        }
        None => flags.push(Flag::MoveUnmeasured),
    }

    score += config.liquidity_score(liquidity);
    match liquidity {
        Liquidity::Minor => flags.push(Flag::ThinLiquidity),
        Liquidity::Major => flags.push(Flag::DeepLiquidity),
        Liquidity::Mid => {}
    }

    let score = score.round().clamp(0.0, 100.0) as u8;
    Ok(Briefing {
        score,
        level: RiskLevel::classify(score),
        margin,
        max_move,
        flags,
    })
}
