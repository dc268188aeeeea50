//! Text-keyed duplicate detection among parlay legs.
//!
//! Each leg is reduced to a coarse key made of its first two normalised tokens, so legs naming the
//! same team or match collide. This is a lint, not entity resolution: it neither proves nor rules
//! out independence between legs.

use anyhow::bail;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::InvalidInput;

const KEY_TOKENS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParlayConfig {
    /// Leg count at which the parlay is flagged as having many legs.
    pub many_legs: usize,
}
impl ParlayConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.many_legs < 2 {
            bail!("many-legs threshold must be at least 2")
        }
        Ok(())
    }
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self { many_legs: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Correlation {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParlayCheck {
    pub legs: usize,

    /// Keys occurring more than once, most frequent first.
    pub overlaps: Vec<Overlap>,
    pub correlation: Correlation,
    pub many_legs: bool,
}

/// Lower-cases `leg`, replaces every non-alphanumeric character with a space and collapses runs
/// of whitespace.
pub fn normalise(leg: &str) -> String {
    let replaced: String = leg
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first two tokens of the normalised `leg`.
pub fn leg_key(leg: &str) -> String {
    normalise(leg)
        .split(' ')
        .filter(|token| !token.is_empty())
        .take(KEY_TOKENS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Checks newline-separated `text` for legs sharing a key. More than `dup_limit` legs on a single
/// key is a high correlation risk; any shared key within the limit is moderate.
///
/// # Errors
/// [InvalidInput::Empty] if `text` holds no legs.
pub fn parlay_overlap(
    text: &str,
    dup_limit: usize,
    config: &ParlayConfig,
) -> Result<ParlayCheck, InvalidInput> {
    let legs: Vec<_> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if legs.is_empty() {
        return Err(InvalidInput::Empty("parlay legs"));
    }

    let mut counts = FxHashMap::<String, usize>::default();
    for leg in &legs {
        let key = leg_key(leg);
        if !key.is_empty() {
            *counts.entry(key).or_default() += 1;
        }
    }

    let mut overlaps: Vec<_> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, count)| Overlap { key, count })
        .collect();
    overlaps.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    let correlation = match overlaps.first() {
        Some(most) if most.count > dup_limit => Correlation::High,
        Some(_) => Correlation::Moderate,
        None => Correlation::Low,
    };
    Ok(ParlayCheck {
        legs: legs.len(),
        overlaps,
        correlation,
        many_legs: legs.len() >= config.many_legs,
    })
}
