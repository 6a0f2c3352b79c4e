//! Simulation errors
//!
//! Every variant means the simulation can no longer produce a trustworthy
//! status. Callers stop the loop instead of guessing an outcome.

use std::fmt;

use crate::sim::EntityKind;

/// Fatal simulation error
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A raw direction mask had both bits of an axis set, or unknown bits
    MalformedDirection(u8),
    /// A rule needed an entity that is not in the collection
    MissingEntity(EntityKind),
    /// Tuning values outside their allowed range
    InvalidTuning(String),
    /// The asset loader could not resolve a sprite
    Asset(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MalformedDirection(bits) => {
                write!(f, "malformed direction mask {bits:#06b}")
            }
            SimError::MissingEntity(kind) => write!(f, "no {kind:?} in game state"),
            SimError::InvalidTuning(reason) => write!(f, "invalid tuning: {reason}"),
            SimError::Asset(reason) => write!(f, "asset loading failed: {reason}"),
        }
    }
}

impl std::error::Error for SimError {}
