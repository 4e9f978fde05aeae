//! Engine error taxonomy
//!
//! Every variant is locally recoverable: a command that fails leaves the
//! run exactly as it was.

use thiserror::Error;

use crate::economy::PowerupKey;
use crate::turn::Phase;

/// Errors reported by engine commands
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient gold for {key}: costs {price}, have {gold}")]
    InsufficientFunds { key: PowerupKey, price: u64, gold: u64 },

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("cannot {command} during {phase}")]
    IllegalTransition { command: &'static str, phase: Phase },

    #[error("unknown powerup: {0}")]
    UnknownPowerup(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for EngineError {
    fn from(err: figment::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidAction(msg.into())
    }
}
