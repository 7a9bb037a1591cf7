use candle_core::{DType, Tensor};

use crate::error::{Result, TranslateError};

/// Greedy next-token selection with a set of ids that may never be emitted.
pub struct GreedySampler {
    suppressed: Vec<u32>,
}

impl GreedySampler {
    pub fn new(suppressed: Vec<u32>) -> Self {
        Self { suppressed }
    }

    pub fn sample(&self, logits: &Tensor) -> Result<u32> {
        let logits = get_last_logits(logits)?;
        let mut logits_vec: Vec<f32> = logits.to_dtype(DType::F32)?.to_vec1()?;

        for &id in &self.suppressed {
            if let Some(score) = logits_vec.get_mut(id as usize) {
                *score = f32::NEG_INFINITY;
            }
        }

        logits_vec
            .iter()
            .enumerate()
            .filter(|(_, score)| !score.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx as u32)
            .ok_or_else(|| TranslateError::Inference("Empty logits".to_string()))
    }
}

/// Reduce decoder output of shape `(batch, seq, vocab)` or `(seq, vocab)` to the
/// logits of the last position.
pub fn get_last_logits(logits: &Tensor) -> Result<Tensor> {
    let dims = logits.dims();
    match dims.len() {
        1 => Ok(logits.clone()),
        2 => Ok(logits.get(dims[0] - 1)?),
        3 => {
            let seq_len = dims[1];
            Ok(logits.get(0)?.get(seq_len - 1)?)
        }
        n => Err(TranslateError::Inference(format!(
            "Unexpected logits rank {}",
            n
        ))),
    }
}
