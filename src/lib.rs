//! A small, stateless risk-analytics kernel for sports and casino betting decision support.
//! Converts quoted odds into probabilities, measures market movement and closing-line value,
//! sizes bets under a capped fractional Kelly criterion, and estimates the likelihood of
//! bankroll ruin and of long winning or losing streaks.

#![allow(clippy::too_many_arguments)]

pub mod briefing;
pub mod clv;
pub mod config;
pub mod error;
pub mod file;
pub mod kelly;
pub mod ledger;
pub mod market;
pub mod movement;
pub mod parlay;
pub mod parse;
pub mod price;
pub mod print;
pub mod probs;
pub mod ruin;
pub mod streak;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
