//! Tiered match cascade.
//!
//! Sequences the comparison tiers (exact match, local encoder, standard
//! reasoning, premium reasoning), short-circuiting on the first decisive
//! rule. Thresholds are inclusive at the boundary that favors the cheaper
//! tier. Remote oracle unavailability always degrades to the next cheaper
//! tier's fallback; the cascade never fails a reachable tier.

mod error;
mod types;

#[cfg(test)]
mod tests;

pub use error::CascadeError;
pub use types::{Tier, Verdict, round4};

use tracing::{debug, info};

use crate::embedding::SimilarityOracle;
use crate::normalize::normalize;
use crate::policy::EscalationPolicy;
use crate::reasoning::{ReasoningOracle, ReasoningTier};

/// Default acceptance threshold when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Default lower cutoff below which (inclusive) the local score is trusted
/// to mean "wrong".
pub const DEFAULT_LOW_CUTOFF: f32 = 0.15;

#[derive(Debug, Clone, Copy)]
/// Tunable cascade parameters.
pub struct CascadeConfig {
    /// Acceptance threshold used when a request carries none.
    pub default_threshold: f32,
    /// Scores at or below this are decisively wrong at the local tier.
    pub low_cutoff: f32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            low_cutoff: DEFAULT_LOW_CUTOFF,
        }
    }
}

/// Orchestrates the tiers and produces a [`Verdict`].
///
/// Shared, read-only state: safe to serve concurrent requests against one
/// instance. No request blocks on another's completion.
pub struct MatchCascade<S, R> {
    scorer: S,
    reasoner: R,
    policy: EscalationPolicy,
    config: CascadeConfig,
}

impl<S, R> std::fmt::Debug for MatchCascade<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCascade")
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish()
    }
}

impl<S, R> MatchCascade<S, R>
where
    S: SimilarityOracle,
    R: ReasoningOracle,
{
    pub fn new(scorer: S, reasoner: R, policy: EscalationPolicy, config: CascadeConfig) -> Self {
        Self {
            scorer,
            reasoner,
            policy,
            config,
        }
    }

    /// Default threshold applied when a request carries none.
    pub fn default_threshold(&self) -> f32 {
        self.config.default_threshold
    }

    /// Returns `true` if a remote reasoning oracle is configured.
    pub fn reasoning_available(&self) -> bool {
        self.reasoner.is_available()
    }

    /// Runs the cascade for one guess/answer pair.
    ///
    /// `threshold` falls back to the configured default. Decisions use the
    /// full-precision score; round only for display.
    pub async fn check(
        &self,
        guess: &str,
        answer: &str,
        threshold: Option<f32>,
    ) -> Result<Verdict, CascadeError> {
        let threshold = threshold.unwrap_or(self.config.default_threshold);

        let guess_clean = normalize(guess);
        let answer_clean = normalize(answer);

        // Empty-input guard: cost-free, no model invoked.
        if guess_clean.is_empty() || answer_clean.is_empty() {
            debug!("Empty input after normalization, rejecting");
            return Ok(Verdict {
                is_correct: false,
                similarity: 0.0,
                method: Tier::EmptyInputRejection,
                local_similarity: None,
                standard_says: None,
                premium_says: None,
                trail: vec![],
            });
        }

        let mut trail = vec![Tier::ExactMatch];

        if guess_clean == answer_clean {
            debug!("Exact match");
            return Ok(Verdict {
                is_correct: true,
                similarity: 1.0,
                method: Tier::ExactMatch,
                local_similarity: None,
                standard_says: None,
                premium_says: None,
                trail,
            });
        }

        trail.push(Tier::LocalModel);
        let local_similarity = self.scorer.score(&guess_clean, &answer_clean)?;

        debug!(
            similarity = local_similarity,
            threshold, "Local encoder score"
        );

        // Boundaries are inclusive toward the cheaper tier: a score exactly
        // at `threshold` accepts here, exactly at `low_cutoff` rejects here.
        if local_similarity >= threshold {
            return Ok(self.local_verdict(true, local_similarity, Tier::LocalModel, trail));
        }
        if local_similarity <= self.config.low_cutoff {
            return Ok(self.local_verdict(false, local_similarity, Tier::LocalModel, trail));
        }

        // Ambiguous band: consult remote reasoning if we can.
        if !self.reasoner.is_available() {
            debug!("No reasoning oracle configured, using local fallback");
            let is_correct = local_similarity >= threshold;
            return Ok(self.local_verdict(is_correct, local_similarity, Tier::LocalFallback, trail));
        }

        info!(
            similarity = local_similarity,
            "Local encoder uncertain, asking standard reasoning"
        );

        trail.push(Tier::StandardReasoning);
        let standard_says = self
            .reasoner
            .ask(ReasoningTier::Standard, &guess_clean, &answer_clean)
            .await;

        let Some(standard_answer) = standard_says else {
            debug!("Standard reasoning unavailable, using local fallback");
            let is_correct = local_similarity >= threshold;
            // The reasoning attempt stays in the trail for observability.
            return Ok(self.local_verdict(is_correct, local_similarity, Tier::LocalFallback, trail));
        };

        if standard_answer {
            return Ok(Verdict {
                is_correct: true,
                similarity: 1.0,
                method: Tier::StandardReasoning,
                local_similarity: Some(local_similarity),
                standard_says,
                premium_says: None,
                trail,
            });
        }

        // Standard said NO. Premium is consulted only when the policy says
        // the case is worth it; a standard YES is always terminal.
        let escalate = self.policy.should_escalate(
            &guess_clean,
            &answer_clean,
            guess,
            answer,
            local_similarity,
        );

        if escalate {
            info!("Standard reasoning said no but complex content detected, asking premium");

            trail.push(Tier::PremiumReasoning);
            let premium_says = self
                .reasoner
                .ask(ReasoningTier::Premium, &guess_clean, &answer_clean)
                .await;

            if let Some(premium_answer) = premium_says {
                return Ok(Verdict {
                    is_correct: premium_answer,
                    similarity: if premium_answer { 1.0 } else { local_similarity },
                    method: Tier::PremiumReasoning,
                    local_similarity: Some(local_similarity),
                    standard_says,
                    premium_says,
                    trail,
                });
            }

            debug!("Premium reasoning unavailable, keeping standard verdict");
        }

        Ok(Verdict {
            is_correct: false,
            similarity: local_similarity,
            method: Tier::StandardReasoning,
            local_similarity: Some(local_similarity),
            standard_says,
            premium_says: None,
            trail,
        })
    }

    fn local_verdict(
        &self,
        is_correct: bool,
        local_similarity: f32,
        method: Tier,
        trail: Vec<Tier>,
    ) -> Verdict {
        Verdict {
            is_correct,
            similarity: local_similarity,
            method,
            local_similarity: Some(local_similarity),
            standard_says: None,
            premium_says: None,
            trail,
        }
    }
}
