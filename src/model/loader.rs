use std::path::PathBuf;

use hf_hub::api::sync::{Api, ApiBuilder, ApiRepo};
use hf_hub::{Repo, RepoType};
use tracing::info;

use crate::config::Args;
use crate::error::{Result, TranslateError};

#[derive(Debug, Clone, PartialEq)]
pub enum WeightFile {
    Safetensors(PathBuf),
    Pytorch(PathBuf),
}

pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: WeightFile,
    pub source_tokenizer: PathBuf,
    pub target_tokenizer: PathBuf,
}

/// Resolve everything the Marian pair needs from the Hugging Face Hub,
/// downloading into the local cache on first use.
pub fn fetch_model_files(args: &Args) -> Result<ModelFiles> {
    info!("Fetching model: {} (revision: {})", args.model, args.revision);

    let api = match args.hf_token.as_deref() {
        Some(t) => ApiBuilder::new()
            .with_token(Some(t.to_string()))
            .build()
            .map_err(|e| TranslateError::Hub(e.to_string()))?,
        None => Api::new().map_err(|e| TranslateError::Hub(e.to_string()))?,
    };

    let model_repo = api.repo(Repo::with_revision(
        args.model.clone(),
        RepoType::Model,
        args.revision.clone(),
    ));

    let config = fetch(&model_repo, "config.json")?;
    let weights = fetch_weights(&model_repo)?;

    // Marian ships sentencepiece files only; tokenizer.json exports live elsewhere.
    let tokenizer_repo = api.model(args.tokenizer_repo.clone());
    let source_tokenizer = fetch(&tokenizer_repo, &args.source_tokenizer)?;
    let target_tokenizer = fetch(&tokenizer_repo, &args.target_tokenizer)?;

    info!(
        "Model files ready: config={:?}, weights={:?}, tokenizers=({:?}, {:?})",
        config, weights, source_tokenizer, target_tokenizer
    );

    Ok(ModelFiles {
        config,
        weights,
        source_tokenizer,
        target_tokenizer,
    })
}

fn fetch(repo: &ApiRepo, filename: &str) -> Result<PathBuf> {
    info!("Downloading {}...", filename);
    repo.get(filename)
        .map_err(|e| TranslateError::Hub(format!("Failed to download {}: {}", filename, e)))
}

fn fetch_weights(repo: &ApiRepo) -> Result<WeightFile> {
    if let Ok(path) = repo.get("model.safetensors") {
        return Ok(WeightFile::Safetensors(path));
    }

    if let Ok(path) = repo.get("pytorch_model.bin") {
        return Ok(WeightFile::Pytorch(path));
    }

    Err(TranslateError::Hub(
        "Could not find model weights (tried model.safetensors, pytorch_model.bin)".to_string(),
    ))
}
