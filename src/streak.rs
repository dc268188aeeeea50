//! Exact probability of observing a run of consecutive successes in a sequence of independent
//! Bernoulli trials.
//!
//! The dynamic program tracks `k` transient states, where state `j` is "the current run has
//! length `j` and no run of length `k` has occurred yet". A failure sends every state to 0; a
//! success advances `j` to `j + 1`, and advancing to `k` is absorbed as "run achieved". After `n`
//! trials the mass left in the transient states is the probability of no run.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{require, InvalidInput};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakConfig {
    pub common_above: f64,
    pub plausible_above: f64,
}
impl StreakConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=1.0).contains(&self.plausible_above)
            || !(0.0..=1.0).contains(&self.common_above)
        {
            bail!("streak bands must lie in [0, 1]")
        }
        if self.plausible_above > self.common_above {
            bail!("plausible band cannot exceed the common band")
        }
        Ok(())
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            common_above: 0.7,
            plausible_above: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Commonness {
    Common,
    Plausible,
    Rare,
}
impl Commonness {
    pub fn classify(prob: f64, config: &StreakConfig) -> Self {
        if prob > config.common_above {
            Self::Common
        } else if prob > config.plausible_above {
            Self::Plausible
        } else {
            Self::Rare
        }
    }
}

/// Probability that `trials` independent trials, each succeeding with probability `p`, contain at
/// least one run of `run_length` or more consecutive successes. A `run_length` of 0 is treated
/// as 1.
///
/// Runs in `O(trials × run_length)` time and `O(run_length)` space.
///
/// # Errors
/// [InvalidInput] if `p` is non-finite or outside `[0, 1]`.
pub fn run_probability(trials: u64, p: f64, run_length: usize) -> Result<f64, InvalidInput> {
    let p = require("success probability", "in [0, 1]", p, |p| {
        (0.0..=1.0).contains(&p)
    })?;
    let run_length = usize::max(1, run_length);
    if trials < run_length as u64 || p == 0.0 {
        return Ok(0.0);
    }

    let q = 1.0 - p;
    let mut states = vec![0.0; run_length];
    let mut next = vec![0.0; run_length];
    states[0] = 1.0;
    for _ in 0..trials {
        next.fill(0.0);
        for (j, &prob) in states.iter().enumerate() {
            if prob == 0.0 {
                continue;
            }
            next[0] += prob * q;
            if j + 1 < run_length {
                next[j + 1] += prob * p;
            }
        }
        std::mem::swap(&mut states, &mut next);
    }
    let no_run: f64 = states.iter().sum();
    Ok(1.0 - no_run)
}
