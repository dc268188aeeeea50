//! The [InvalidInput] taxonomy shared by every kernel function.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be {domain}, got {value}")]
    OutOfDomain {
        field: &'static str,
        domain: &'static str,
        value: f64,
    },

    #[error("at least {min} {field} required, got {actual}")]
    TooFew {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{left} and {right} must be of equal length: {left_len} ≠ {right_len}")]
    Misaligned {
        left: &'static str,
        right: &'static str,
        left_len: usize,
        right_len: usize,
    },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid config: {0}")]
    Config(String),
}
impl InvalidInput {
    pub(crate) fn config(err: anyhow::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NonFinite { field, value })
    }
}

/// Requires a finite `value` satisfying `predicate`, which is described by `domain` in the error.
pub(crate) fn require(
    field: &'static str,
    domain: &'static str,
    value: f64,
    predicate: impl FnOnce(f64) -> bool,
) -> Result<f64, InvalidInput> {
    let value = require_finite(field, value)?;
    if predicate(value) {
        Ok(value)
    } else {
        Err(InvalidInput::OutOfDomain {
            field,
            domain,
            value,
        })
    }
}
