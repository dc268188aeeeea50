//! Monte Carlo estimate of bankroll ruin under repeated flat-stake bets.
//!
//! A win pays `payout × stake` and a loss costs the stake, so the expected value per unit stake
//! is `p·payout - (1 - p)`. Setting this to `-house_edge` gives the synthetic win probability
//! `p = (1 - house_edge) / (payout + 1)`. Each simulated path stakes `min(bankroll, bet)`, never
//! borrowing, and stops as soon as the bankroll is exhausted.
//!
//! The random source is supplied by the caller; identical sources yield identical summaries.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tinyrand::Rand;

use crate::error::{require_finite, InvalidInput};
use crate::probs::Percentiles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuinConfig {
    pub min_sims: u64,
    pub max_sims: u64,
    pub max_trials: u64,
    pub max_house_edge_percent: f64,
    pub min_payout: f64,
    pub min_win_prob: f64,
    pub max_win_prob: f64,

    /// Ruin probability above which a summary is reported as severe.
    pub severe_ruin: f64,
}
impl RuinConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.min_sims == 0 || self.min_sims > self.max_sims {
            bail!("simulation bounds must satisfy 0 < min ≤ max")
        }
        if self.max_trials == 0 {
            bail!("at least one trial must be permitted")
        }
        if !(0.0..100.0).contains(&self.max_house_edge_percent) {
            bail!("max house edge must lie in [0, 100)")
        }
        if !self.min_payout.is_finite() || self.min_payout <= 0.0 {
            bail!("min payout must be positive and finite")
        }
        if !(self.min_win_prob > 0.0
            && self.min_win_prob <= self.max_win_prob
            && self.max_win_prob < 1.0)
        {
            bail!("win probability bounds must satisfy 0 < min ≤ max < 1")
        }
        if !(0.0..=1.0).contains(&self.severe_ruin) {
            bail!("severe ruin threshold must lie in [0, 1]")
        }
        Ok(())
    }
}

impl Default for RuinConfig {
    fn default() -> Self {
        Self {
            min_sims: 300,
            max_sims: 6_000,
            max_trials: 100_000,
            max_house_edge_percent: 20.0,
            min_payout: 0.5,
            min_win_prob: 0.001,
            max_win_prob: 0.999,
            severe_ruin: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuinParams {
    pub bankroll: f64,
    pub bet: f64,
    pub trials: u64,
    pub sims: u64,
    pub house_edge_percent: f64,

    /// Profit multiple of the stake on a win; 1 is even money.
    pub payout: f64,
}
impl RuinParams {
    /// Brings every parameter within the bounds of `config`. Out-of-range values are clamped;
    /// only non-finite values and an invalid `config` are rejected.
    pub fn clamp(&self, config: &RuinConfig) -> Result<Self, InvalidInput> {
        config.validate().map_err(InvalidInput::config)?;
        let bankroll = require_finite("bankroll", self.bankroll)?;
        let bet = require_finite("bet", self.bet)?;
        let house_edge_percent = require_finite("house edge", self.house_edge_percent)?;
        let payout = require_finite("payout", self.payout)?;
        Ok(Self {
            bankroll: f64::max(0.0, bankroll),
            bet: f64::max(0.0, bet),
            trials: self.trials.clamp(1, config.max_trials),
            sims: self.sims.clamp(config.min_sims, config.max_sims),
            house_edge_percent: house_edge_percent.clamp(0.0, config.max_house_edge_percent),
            payout: f64::max(config.min_payout, payout),
        })
    }

    /// The synthetic win probability matching the house edge, assuming already-clamped parameters.
    pub fn win_prob(&self, config: &RuinConfig) -> f64 {
        let house_edge = self.house_edge_percent / 100.0;
        let win_prob = (1.0 - house_edge) / (self.payout + 1.0);
        f64::max(config.min_win_prob, f64::min(config.max_win_prob, win_prob))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    pub final_bankroll: f64,
    pub max_drawdown: f64,
    pub trials: u64,
}
impl PathOutcome {
    pub fn is_ruined(&self) -> bool {
        self.final_bankroll <= 0.0
    }
}

/// Runs one path of at most `trials` bets, stopping early once the bankroll reaches zero.
pub fn run_path(
    bankroll: f64,
    bet: f64,
    trials: u64,
    payout: f64,
    win_prob: f64,
    rand: &mut impl Rand,
) -> PathOutcome {
    debug_assert!(win_prob > 0.0 && win_prob < 1.0, "invalid win probability {win_prob}");

    let mut bankroll = bankroll;
    let mut peak = bankroll;
    let mut max_drawdown = 0.0;
    let mut completed = 0;
    while completed < trials && bankroll > 0.0 {
        let stake = f64::min(bankroll, bet);
        if random_f64(rand) < win_prob {
            bankroll += stake * payout;
        } else {
            bankroll -= stake;
        }
        completed += 1;

        peak = f64::max(peak, bankroll);
        max_drawdown = f64::max(max_drawdown, peak - bankroll);
    }
    PathOutcome {
        final_bankroll: bankroll,
        max_drawdown,
        trials: completed,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuinSummary {
    /// Parameters after clamping.
    pub params: RuinParams,
    pub win_prob: f64,

    /// Fraction of paths that ended with a bankroll of zero or less.
    pub ruin_prob: f64,
    pub final_bankroll: Percentiles,
    pub max_drawdown: Percentiles,
}
impl RuinSummary {
    pub fn is_severe(&self, config: &RuinConfig) -> bool {
        self.ruin_prob > config.severe_ruin
    }
}

/// Simulates `params.sims` independent paths using the supplied random source.
///
/// # Errors
/// [InvalidInput] if any parameter is non-finite or `config` fails validation.
pub fn simulate(
    params: &RuinParams,
    config: &RuinConfig,
    rand: &mut impl Rand,
) -> Result<RuinSummary, InvalidInput> {
    let params = params.clamp(config)?;
    let win_prob = params.win_prob(config);

    let sims = params.sims as usize;
    let mut finals = Vec::with_capacity(sims);
    let mut drawdowns = Vec::with_capacity(sims);
    let mut ruined = 0;
    for _ in 0..sims {
        let outcome = run_path(
            params.bankroll,
            params.bet,
            params.trials,
            params.payout,
            win_prob,
            rand,
        );
        if outcome.is_ruined() {
            ruined += 1;
        }
        finals.push(outcome.final_bankroll);
        drawdowns.push(outcome.max_drawdown);
    }

    Ok(RuinSummary {
        win_prob,
        ruin_prob: ruined as f64 / sims as f64,
        final_bankroll: Percentiles::of(&mut finals),
        max_drawdown: Percentiles::of(&mut drawdowns),
        params,
    })
}

/// A uniform draw in `[0, 1]`.
#[inline]
fn random_f64(rand: &mut impl Rand) -> f64 {
    rand.next_u64() as f64 / u64::MAX as f64
}
