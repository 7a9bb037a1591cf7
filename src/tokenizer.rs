use std::path::Path;

use tokenizers::Tokenizer;
use tracing::info;

use crate::error::{Result, TranslateError};

pub struct TokenizerWrapper {
    tokenizer: Tokenizer,
}

impl TokenizerWrapper {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading tokenizer from {:?}", path);
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| TranslateError::Tokenizer(e.to_string()))?;

        info!("Tokenizer loaded with {} tokens", tokenizer.get_vocab_size(true));
        Ok(Self { tokenizer })
    }

    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| TranslateError::Tokenizer(e.to_string()))?;

        Ok(encoding.get_ids().to_vec())
    }

    /// Decode ids back to text, dropping special markers such as `</s>` and `<pad>`.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer
            .decode(ids, true)
            .map_err(|e| TranslateError::Tokenizer(e.to_string()))
    }

    pub fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }
}

/// Marian keeps separate vocabularies for the encoder and the decoder side.
pub struct TokenizerPair {
    pub source: TokenizerWrapper,
    pub target: TokenizerWrapper,
}

impl TokenizerPair {
    pub fn load(source: &Path, target: &Path) -> Result<Self> {
        Ok(Self {
            source: TokenizerWrapper::load(source)?,
            target: TokenizerWrapper::load(target)?,
        })
    }
}
