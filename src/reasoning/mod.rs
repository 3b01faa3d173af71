//! Remote reasoning oracle (standard and premium tiers).
//!
//! The cascade consults a [`ReasoningOracle`] only for ambiguous local
//! scores. Unavailability (missing configuration, provider errors,
//! timeouts, unparsable answers) is reported as `None` and never as an
//! error: the cascade degrades to a cheaper tier instead.

mod client;
mod prompt;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use client::{GenaiReasoner, ReasoningConfig};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockReasoner;

use async_trait::async_trait;

/// Which reasoning model variant to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningTier {
    /// Cheap model for standard synonym/description cases.
    Standard,
    /// Expensive model for cases needing deep domain knowledge.
    Premium,
}

impl ReasoningTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningTier::Standard => "standard",
            ReasoningTier::Premium => "premium",
        }
    }
}

/// A capability that answers "are these two things the same?" or reports
/// itself unavailable.
///
/// Implementations must bound each call with a timeout; a hung remote call
/// is treated identically to an unavailable oracle.
#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    /// Returns `Some(answer)` on a successful yes/no response, `None` when
    /// the oracle is unavailable for any reason.
    async fn ask(&self, tier: ReasoningTier, guess: &str, answer: &str) -> Option<bool>;

    /// Returns `true` if the oracle is configured at all. A `true` here
    /// does not guarantee individual calls succeed.
    fn is_available(&self) -> bool;
}
