use std::time::Duration;

use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, warn};

use async_trait::async_trait;

use super::prompt::{build_prompt, parse_answer};
use super::{ReasoningOracle, ReasoningTier};

/// Upper bound on remote call duration. A hung provider call must not
/// stall unrelated requests.
pub const DEFAULT_REASONING_TIMEOUT_SECS: u64 = 10;

/// Default model for the standard tier.
pub const DEFAULT_STANDARD_MODEL: &str = "gpt-3.5-turbo";

/// Default model for the premium tier.
pub const DEFAULT_PREMIUM_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
/// Configuration for [`GenaiReasoner`].
pub struct ReasoningConfig {
    /// Model name for [`ReasoningTier::Standard`].
    pub standard_model: String,
    /// Model name for [`ReasoningTier::Premium`].
    pub premium_model: String,
    /// Per-call timeout.
    pub timeout: Duration,
    /// If false, every call reports unavailable without touching the network.
    pub enabled: bool,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            standard_model: DEFAULT_STANDARD_MODEL.to_string(),
            premium_model: DEFAULT_PREMIUM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REASONING_TIMEOUT_SECS),
            enabled: true,
        }
    }
}

impl ReasoningConfig {
    /// Config that reports unavailable for every call.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Reasoning oracle backed by the genai multi-provider client.
///
/// One bounded attempt per call; no retry. The cascade's own tier fallback
/// is the retry-equivalent mechanism.
pub struct GenaiReasoner {
    client: Client,
    config: ReasoningConfig,
}

impl std::fmt::Debug for GenaiReasoner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiReasoner")
            .field("standard_model", &self.config.standard_model)
            .field("premium_model", &self.config.premium_model)
            .field("timeout", &self.config.timeout)
            .field("enabled", &self.config.enabled)
            .finish()
    }
}

impl GenaiReasoner {
    pub fn new(config: ReasoningConfig) -> Self {
        Self {
            client: Client::default(),
            config,
        }
    }

    pub fn config(&self) -> &ReasoningConfig {
        &self.config
    }

    fn model_for(&self, tier: ReasoningTier) -> &str {
        match tier {
            ReasoningTier::Standard => &self.config.standard_model,
            ReasoningTier::Premium => &self.config.premium_model,
        }
    }
}

#[async_trait]
impl ReasoningOracle for GenaiReasoner {
    async fn ask(&self, tier: ReasoningTier, guess: &str, answer: &str) -> Option<bool> {
        if !self.config.enabled {
            return None;
        }

        let model = self.model_for(tier);
        let prompt = build_prompt(tier, guess, answer);
        let chat_req = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        // Temperature 0 for consistent answers; the reply is a single token.
        let options = ChatOptions::default()
            .with_temperature(0.0)
            .with_max_tokens(5);

        let call = self.client.exec_chat(model, chat_req, Some(&options));

        let response = match tokio::time::timeout(self.config.timeout, call).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!(tier = tier.as_str(), model, error = %e, "Reasoning call failed");
                return None;
            }
            Err(_) => {
                warn!(
                    tier = tier.as_str(),
                    model,
                    timeout_secs = self.config.timeout.as_secs(),
                    "Reasoning call timed out"
                );
                return None;
            }
        };

        let reply = response.first_text().unwrap_or_default();
        let parsed = parse_answer(reply);

        if parsed.is_none() {
            warn!(tier = tier.as_str(), model, reply, "Unparsable reasoning reply");
        } else {
            debug!(tier = tier.as_str(), model, reply, "Reasoning reply");
        }

        parsed
    }

    fn is_available(&self) -> bool {
        self.config.enabled
    }
}
