use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::marian::{Config, MTModel};
use tracing::info;

use super::loader::{ModelFiles, WeightFile};
use crate::error::{Result, TranslateError};

/// Loaded Marian weights for one language pair.
///
/// The weights are never touched after `load`. Callers translate on a
/// [`session`](MarianModel::session), a clone that shares the weight tensors
/// but owns its decoder KV cache.
pub struct MarianModel {
    model: MTModel,
    config: Config,
    device: Device,
}

impl MarianModel {
    pub fn load(files: &ModelFiles, device: &Device) -> Result<Self> {
        info!("Loading Marian model configuration...");
        let config_str = std::fs::read_to_string(&files.config)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| {
            TranslateError::ModelLoad(format!("Invalid Marian config {:?}: {}", files.config, e))
        })?;

        info!(
            "Model config: vocab_size={}, d_model={}, encoder_layers={}, decoder_layers={}",
            config.vocab_size, config.d_model, config.encoder_layers, config.decoder_layers
        );

        info!("Loading model weights...");
        let vb = match &files.weights {
            WeightFile::Safetensors(path) => unsafe {
                VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)?
            },
            WeightFile::Pytorch(path) => VarBuilder::from_pth(path, DType::F32, device)?,
        };

        info!("Building model...");
        let model = MTModel::new(&config, vb)?;

        info!("Marian model loaded successfully");
        Ok(Self {
            model,
            config,
            device: device.clone(),
        })
    }

    pub fn session(&self) -> MTModel {
        let mut model = self.model.clone();
        model.reset_kv_cache();
        model
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}
