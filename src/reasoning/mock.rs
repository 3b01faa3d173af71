//! Mock reasoning oracle with scripted per-tier answers.

use async_trait::async_trait;

use super::{ReasoningOracle, ReasoningTier};

/// Reasoning oracle that returns scripted answers per tier.
///
/// `None` for a tier means "unavailable", exercising the cascade's
/// fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockReasoner {
    pub standard: Option<bool>,
    pub premium: Option<bool>,
}

impl MockReasoner {
    /// Both tiers unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Standard tier answers `answer`; premium unavailable.
    pub fn standard(answer: bool) -> Self {
        Self {
            standard: Some(answer),
            premium: None,
        }
    }

    /// Scripted answers for both tiers.
    pub fn with_answers(standard: bool, premium: bool) -> Self {
        Self {
            standard: Some(standard),
            premium: Some(premium),
        }
    }
}

#[async_trait]
impl ReasoningOracle for MockReasoner {
    async fn ask(&self, tier: ReasoningTier, _guess: &str, _answer: &str) -> Option<bool> {
        match tier {
            ReasoningTier::Standard => self.standard,
            ReasoningTier::Premium => self.premium,
        }
    }

    fn is_available(&self) -> bool {
        self.standard.is_some() || self.premium.is_some()
    }
}
