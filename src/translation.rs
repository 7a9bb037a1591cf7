use std::time::Instant;

use candle_core::Tensor;
use tracing::{debug, info};

use crate::config::DecodeConfig;
use crate::error::{Result, TranslateError};
use crate::model::MarianModel;
use crate::sampling::GreedySampler;
use crate::tokenizer::TokenizerPair;

pub struct TranslationOutput {
    pub text: String,
    pub tokens: Vec<u32>,
    pub tokens_per_second: f64,
    pub total_time_ms: u128,
}

/// Blocking source-to-target translation.
///
/// Implementations are shared across threads and called from the blocking pool,
/// so `translate` takes `&self` and must not rely on interior mutation.
pub trait Translator: Send + Sync {
    /// `target_language` is advisory; the loaded pair decides the output language.
    fn translate(&self, text: &str, target_language: &str) -> Result<TranslationOutput>;

    /// Human-readable label for logs, usually the model id.
    fn name(&self) -> &str;
}

pub struct MarianTranslator {
    model: MarianModel,
    tokenizers: TokenizerPair,
    model_id: String,
    target_language: Option<String>,
    max_decode_len: usize,
}

impl MarianTranslator {
    pub fn new(
        model: MarianModel,
        tokenizers: TokenizerPair,
        model_id: String,
        target_language: Option<String>,
        config: &DecodeConfig,
    ) -> Self {
        let max_positions = model.config().max_position_embeddings;
        let max_decode_len = config
            .max_decode_len
            .unwrap_or(max_positions)
            .min(max_positions);
        Self {
            model,
            tokenizers,
            model_id,
            target_language,
            max_decode_len,
        }
    }

    fn encode_source(&self, text: &str) -> Result<Vec<u32>> {
        let eos = self.model.config().eos_token_id;
        let mut tokens = self.tokenizers.source.encode(text)?;
        if tokens.last() != Some(&eos) {
            tokens.push(eos);
        }
        Ok(tokens)
    }
}

impl Translator for MarianTranslator {
    fn translate(&self, text: &str, target_language: &str) -> Result<TranslationOutput> {
        let start_time = Instant::now();
        let config = self.model.config();
        let device = self.model.device();

        if let Some(pair_target) = self.target_language.as_deref() {
            if pair_target != target_language {
                debug!(
                    "Requested target '{}' ignored; model translates to '{}'",
                    target_language, pair_target
                );
            }
        }

        let source_tokens = self.encode_source(text)?;
        if source_tokens.len() > config.max_position_embeddings {
            return Err(TranslateError::Inference(format!(
                "Input is {} tokens, model accepts at most {}",
                source_tokens.len(),
                config.max_position_embeddings
            )));
        }
        debug!("Source tokens: {}", source_tokens.len());

        let mut model = self.model.session();

        let encoder_input = Tensor::new(source_tokens.as_slice(), device)?.unsqueeze(0)?;
        let encoder_xs = model.encoder().forward(&encoder_input, 0)?;

        // The decoder may never emit padding.
        let sampler = GreedySampler::new(vec![config.pad_token_id]);

        let decode_start = Instant::now();
        let mut token_ids = vec![config.decoder_start_token_id];
        for index in 0..self.max_decode_len {
            let context_size = if index >= 1 { 1 } else { token_ids.len() };
            let start_pos = token_ids.len().saturating_sub(context_size);
            let input_ids = Tensor::new(&token_ids[start_pos..], device)?.unsqueeze(0)?;
            let logits = model.decode(&input_ids, &encoder_xs, start_pos)?;

            let next_token = sampler.sample(&logits)?;
            if next_token == config.eos_token_id || next_token == config.forced_eos_token_id {
                debug!("Stop token {} generated at position {}", next_token, index);
                break;
            }
            token_ids.push(next_token);
        }

        let generated = token_ids.split_off(1);
        let decode_time = decode_start.elapsed();
        let tokens_per_second = if decode_time.as_secs_f64() > 0.0 {
            generated.len() as f64 / decode_time.as_secs_f64()
        } else {
            0.0
        };

        let output_text = self.tokenizers.target.decode(&generated)?;

        info!(
            "Translated {} source tokens into {} tokens in {:?} ({:.2} tokens/sec)",
            source_tokens.len(),
            generated.len(),
            decode_time,
            tokens_per_second
        );

        Ok(TranslationOutput {
            text: output_text,
            tokens: generated,
            tokens_per_second,
            total_time_ms: start_time.elapsed().as_millis(),
        })
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}
