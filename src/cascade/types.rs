use serde::Serialize;

/// One stage of the escalation cascade. Exactly one tier is the
/// authoritative source of a given [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Normalized strings were byte-equal.
    ExactMatch,
    /// The local similarity score was decisive on its own.
    LocalModel,
    /// The standard reasoning oracle decided.
    StandardReasoning,
    /// The premium reasoning oracle decided.
    PremiumReasoning,
    /// Remote reasoning was unavailable; the local score decided by default.
    LocalFallback,
    /// Guess or answer was empty after normalization.
    EmptyInputRejection,
}

impl Tier {
    /// Cost rank used for trail ordering (cheaper tiers first).
    pub fn rank(&self) -> u8 {
        match self {
            Tier::EmptyInputRejection => 0,
            Tier::ExactMatch => 1,
            Tier::LocalModel | Tier::LocalFallback => 2,
            Tier::StandardReasoning => 3,
            Tier::PremiumReasoning => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::ExactMatch => "exact_match",
            Tier::LocalModel => "local_model",
            Tier::StandardReasoning => "standard_reasoning",
            Tier::PremiumReasoning => "premium_reasoning",
            Tier::LocalFallback => "local_fallback",
            Tier::EmptyInputRejection => "empty_input_rejection",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final correctness decision plus provenance.
///
/// Created once per request, immutable after construction, never persisted;
/// the attestation signer consumes it immediately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    /// Whether the guess counts as correct.
    pub is_correct: bool,
    /// Similarity evidence for the decision (full precision; round for
    /// display with [`round4`]). `1.0` for exact matches and reasoning
    /// "yes" answers.
    pub similarity: f32,
    /// The tier that decided.
    pub method: Tier,
    /// Raw local encoder score, when the local tier ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_similarity: Option<f32>,
    /// Raw standard reasoning answer, when that tier was consulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_says: Option<bool>,
    /// Raw premium reasoning answer, when that tier was consulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_says: Option<bool>,
    /// Comparison tiers attempted, in cost order. Empty for
    /// [`Tier::EmptyInputRejection`] (nothing was attempted).
    pub trail: Vec<Tier>,
}

impl Verdict {
    /// Similarity rounded to 4 decimal digits for display.
    pub fn similarity_display(&self) -> f32 {
        round4(self.similarity)
    }

    /// Tier number compatible with the escalation ladder
    /// (1 = exact .. 4 = premium; 0 = rejected input).
    pub fn tier_number(&self) -> u8 {
        self.method.rank()
    }
}

/// Rounds to 4 decimal digits. Display only; decisions always use full
/// precision.
pub fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
