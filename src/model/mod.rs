mod loader;
mod marian;

pub use loader::fetch_model_files;
pub use marian::MarianModel;

/// Source and target language codes encoded in an OPUS-MT style model id,
/// e.g. `Helsinki-NLP/opus-mt-en-fr` → `("en", "fr")`.
pub fn language_pair(model_id: &str) -> Option<(String, String)> {
    let name = model_id.rsplit('/').next()?;
    let codes = name
        .strip_prefix("opus-mt-tc-big-")
        .or_else(|| name.strip_prefix("opus-mt-"))?;
    let (source, target) = codes.split_once('-')?;
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some((source.to_string(), target.to_string()))
}
