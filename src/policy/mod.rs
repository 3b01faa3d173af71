//! Escalation policy for the premium reasoning tier.
//!
//! Pure rule table: given the pair of texts and the local similarity score,
//! decide whether a premium reasoning call is worth its cost. Stateless and
//! side-effect-free so it can be tested against literal input/output pairs.
//!
//! The trigger lexicons are kept as data; extending them never touches
//! cascade control flow.


use crate::normalize::contains_pictograph;

/// Roles, events, attribution phrases, organizational nouns and creation
/// verbs that tend to need knowledge beyond the local encoder.
const COMPLEX_CONTENT_MARKERS: &[&str] = &[
    // People and personalities
    "founder",
    "ceo",
    "creator",
    "inventor",
    "author",
    "director",
    // Events and places
    "conference",
    "event",
    "summit",
    "festival",
    "competition",
    "hackathon",
    // Attribution phrases
    "known as",
    "called",
    "nickname",
    "aka",
    "also known",
    // Organizations and technology
    "startup",
    "company",
    "platform",
    "project",
    "protocol",
    // Creation verbs
    "built",
    "created",
    "developed",
    "pioneered",
    "launched",
];

/// Idioms whose surface form shares almost nothing with their meaning.
const IDIOM_MARKERS: &[&str] = &[
    "break a leg",
    "piece of cake",
    "hit the sack",
    "under the weather",
    "spill the beans",
    "once in a blue moon",
    "the ball is in your court",
    "burn the midnight oil",
];

/// Similarity band where near-equal-length pairs suggest a renamed or
/// misspelled reference rather than unrelated text.
const MID_BAND: (f32, f32) = (0.2, 0.5);

/// Very low but nonzero similarity: a possible metaphorical or cultural
/// link that the encoder cannot see.
const LOW_BAND: (f32, f32) = (0.05, 0.15);

/// Max length difference treated as "near-equal".
const NEAR_EQUAL_LEN_SLACK: usize = 2;

/// The "maybe" window outside of which the local score is always trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyConfig {
    /// Inclusive lower bound of the escalation window.
    pub window_low: f32,
    /// Inclusive upper bound of the escalation window.
    pub window_high: f32,
}

impl PolicyConfig {
    /// Stricter variant: escalate only in `[0.15, 0.6]`.
    pub fn strict() -> Self {
        Self {
            window_low: 0.15,
            window_high: 0.6,
        }
    }

    /// Extended variant: escalate in `[0.05, 0.8]`.
    pub fn extended() -> Self {
        Self {
            window_low: 0.05,
            window_high: 0.8,
        }
    }

    /// Returns `true` if `similarity` falls inside the window (inclusive).
    pub fn contains(&self, similarity: f32) -> bool {
        similarity >= self.window_low && similarity <= self.window_high
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::extended()
    }
}

/// Decides whether an ambiguous local score warrants the premium tier.
#[derive(Debug, Clone, Copy)]
pub struct EscalationPolicy {
    config: PolicyConfig,
}

impl EscalationPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Pure decision: escalate to premium reasoning?
    ///
    /// `guess`/`answer` are the normalized strings; `raw_guess`/`raw_answer`
    /// are the originals (pictograph detection works on raw text only).
    pub fn should_escalate(
        &self,
        guess: &str,
        answer: &str,
        raw_guess: &str,
        raw_answer: &str,
        local_similarity: f32,
    ) -> bool {
        // Outside the window the local score is trusted and escalation is
        // never worth the cost.
        if !self.config.contains(local_similarity) {
            return false;
        }

        let combined = format!("{} {}", guess, answer).to_lowercase();

        let complex_content = COMPLEX_CONTENT_MARKERS
            .iter()
            .any(|marker| combined.contains(marker));

        let has_pictograph = contains_pictograph(raw_guess) || contains_pictograph(raw_answer);

        let len_diff = guess.len().abs_diff(answer.len());
        let near_equal_mid_band = len_diff <= NEAR_EQUAL_LEN_SLACK
            && local_similarity >= MID_BAND.0
            && local_similarity <= MID_BAND.1;

        let idiom = IDIOM_MARKERS.iter().any(|marker| combined.contains(marker));

        let low_but_nonzero = local_similarity >= LOW_BAND.0 && local_similarity <= LOW_BAND.1;

        complex_content || has_pictograph || near_equal_mid_band || idiom || low_but_nonzero
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
