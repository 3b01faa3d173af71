use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tracing::{debug, info, warn};

use super::SimilarityOracle;
use super::config::EncoderConfig;
use super::device::select_device;
use super::error::EmbeddingError;

enum EncoderBackend {
    Model {
        model: Arc<BertModel>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
        hidden_size: usize,
    },
    Stub,
}

/// Sentence encoder for similarity scoring (supports stub mode).
///
/// Embeddings are mean-pooled over tokens and L2-normalized, so the score of
/// two identical strings is `1.0` and all scores land in `[-1, 1]`.
pub struct TextEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl TextEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Text encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for text encoder");

        let (model, tokenizer, hidden_size) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            hidden_size,
            max_seq_len = config.max_seq_len,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Arc::new(model),
                tokenizer: Arc::new(tokenizer),
                device,
                hidden_size,
            },
            config,
        })
    }

    fn load_model(
        config: &EncoderConfig,
        device: &Device,
    ) -> Result<(BertModel, tokenizers::Tokenizer, usize), EmbeddingError> {
        let tokenizer = tokenizers::Tokenizer::from_file(config.tokenizer_path()).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let config_content = std::fs::read_to_string(config.config_path())?;
        let bert_config: BertConfig =
            serde_json::from_str(&config_content).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to parse model config: {}", e),
            })?;
        let hidden_size = bert_config.hidden_size;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[config.weights_path()], DType::F32, device)?
        };

        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)?
        } else {
            BertModel::load(vb, &bert_config)?
        };

        Ok((model, tokenizer, hidden_size))
    }

    /// Generates a unit-length embedding for a single string.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
                hidden_size,
            } => self.embed_with_model(text, model, tokenizer, device, *hidden_size),
            EncoderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_with_model(
        &self,
        text: &str,
        model: &Arc<BertModel>,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
        hidden_size: usize,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Ok(vec![0.0; hidden_size]);
        }

        if tokens.len() > self.config.max_seq_len {
            tokens.truncate(self.config.max_seq_len);
        }

        debug!(
            text_len = text.len(),
            token_count = tokens.len(),
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = Tensor::new(&tokens[..], device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;

        // hidden_states shape: [1, seq_len, hidden_size]
        let hidden_states = model.forward(&input_ids, &token_type_ids, None)?;

        // Mean pooling over the token axis.
        let pooled = hidden_states.mean(1)?.squeeze(0)?.to_vec1::<f32>()?;

        Ok(normalize_l2(pooled))
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        debug!(text_len = text.len(), "Generating stub embedding");

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        let mut state = seed;

        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        normalize_l2(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl SimilarityOracle for TextEncoder {
    fn score(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        let ea = self.embed(a)?;
        let eb = self.embed(b)?;

        // Both embeddings are unit-length, so the dot product is the cosine.
        let score: f32 = ea.iter().zip(eb.iter()).map(|(x, y)| x * y).sum();

        Ok(score.clamp(-1.0, 1.0))
    }
}

fn normalize_l2(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
