//! Capped fractional Kelly bet sizing.
//!
//! With net odds `b = odds - 1`, win probability `p` and `q = 1 - p`, the full Kelly fraction is
//! `f = (b·p - q) / b`. The recommended stake layers, in order, a hard clamp on `f`, the caller's
//! fractional multiplier, a loss-streak de-risking guard and a per-bet cap as a fraction of the
//! bankroll. The final stake is rounded to the nearest whole unit (half away from zero).

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{require, InvalidInput};
use crate::price::validate_odds;

/// Scales the adjusted fraction once the number of consecutive recent losses reaches `min_losses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakGuard {
    pub min_losses: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KellyConfig {
    /// Upper bound on the full Kelly fraction, applied before the fractional multiplier.
    pub max_fraction: f64,

    /// At most one guard applies: the one with the largest `min_losses` not exceeding the
    /// current streak.
    pub streak_guards: Vec<StreakGuard>,
}
impl KellyConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=1.0).contains(&self.max_fraction) {
            bail!("max Kelly fraction must lie in [0, 1]")
        }
        for guard in &self.streak_guards {
            if !(0.0..=1.0).contains(&guard.multiplier) {
                bail!("streak guard multiplier must lie in [0, 1]")
            }
        }
        Ok(())
    }

    /// The multiplier of the guard applicable to `losses` consecutive losses, or 1 if none apply.
    pub fn streak_multiplier(&self, losses: u32) -> f64 {
        self.streak_guards
            .iter()
            .filter(|guard| losses >= guard.min_losses)
            .max_by_key(|guard| guard.min_losses)
            .map(|guard| guard.multiplier)
            .unwrap_or(1.0)
    }
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            max_fraction: 0.25,
            streak_guards: vec![
                StreakGuard {
                    min_losses: 2,
                    multiplier: 0.6,
                },
                StreakGuard {
                    min_losses: 4,
                    multiplier: 0.4,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizingRequest {
    pub bankroll: f64,
    pub odds: f64,
    pub win_prob: f64,

    /// Fractional Kelly multiplier, e.g. 0.25 for quarter-Kelly.
    pub fraction: f64,

    /// Largest permissible stake as a fraction of the bankroll.
    pub cap: f64,
    pub loss_streak: u32,
}
impl SizingRequest {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        require("bankroll", "> 0", self.bankroll, |bankroll| bankroll > 0.0)?;
        validate_odds("odds", self.odds)?;
        require("win probability", "in (0, 1)", self.win_prob, |p| {
            p > 0.0 && p < 1.0
        })?;
        require("Kelly multiplier", "in (0, 1]", self.fraction, |fraction| {
            fraction > 0.0 && fraction <= 1.0
        })?;
        require("stake cap", "in [0, 1]", self.cap, |cap| {
            (0.0..=1.0).contains(&cap)
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Verdict {
    Bet,
    /// The estimated probability yields no positive expectation at the quoted odds.
    NoEdge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BetSizing {
    pub verdict: Verdict,

    /// Recommended stake, rounded to a whole unit.
    pub stake: f64,

    /// Full Kelly fraction before any adjustment. Negative when there is no edge.
    pub kelly_fraction: f64,

    /// Kelly fraction after the hard clamp.
    pub clamped_fraction: f64,

    /// Fraction of the bankroll after the multiplier and the streak guard.
    pub adjusted_fraction: f64,
    pub streak_multiplier: f64,

    /// Unrounded `bankroll × adjusted_fraction`, before the cap.
    pub raw_stake: f64,
    pub cap_amount: f64,
}
impl BetSizing {
    /// Whether the per-bet cap, rather than the Kelly fraction, determined the stake.
    pub fn is_capped(&self) -> bool {
        self.raw_stake > self.cap_amount
    }
}

/// Sizes a bet per the module-level policy.
///
/// # Errors
/// [InvalidInput] if the bankroll is not positive, the odds are not above 1, the win probability
/// lies outside `(0, 1)`, the multiplier outside `(0, 1]`, the cap outside `[0, 1]`, or if
/// `config` fails validation.
pub fn kelly_stake(
    request: &SizingRequest,
    config: &KellyConfig,
) -> Result<BetSizing, InvalidInput> {
    config.validate().map_err(InvalidInput::config)?;
    request.validate()?;

    let b = request.odds - 1.0;
    let q = 1.0 - request.win_prob;
    let kelly_fraction = (b * request.win_prob - q) / b;
    let clamped_fraction = kelly_fraction.clamp(0.0, config.max_fraction);
    let streak_multiplier = config.streak_multiplier(request.loss_streak);
    let adjusted_fraction = clamped_fraction * request.fraction * streak_multiplier;

    let raw_stake = request.bankroll * adjusted_fraction;
    let cap_amount = request.bankroll * request.cap;
    let stake = f64::min(raw_stake, cap_amount).round();

    let verdict = if kelly_fraction > 0.0 {
        Verdict::Bet
    } else {
        Verdict::NoEdge
    };
    Ok(BetSizing {
        verdict,
        stake,
        kelly_fraction,
        clamped_fraction,
        adjusted_fraction,
        streak_multiplier,
        raw_stake,
        cap_amount,
    })
}
