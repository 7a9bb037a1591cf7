use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "MarianMT translation server")]
pub struct Args {
    /// Hub id of the Marian model for the one supported language pair
    #[arg(short, long, default_value = "Helsinki-NLP/opus-mt-en-fr")]
    pub model: String,

    /// Revision of the model repo that carries safetensors weights
    #[arg(long, default_value = "refs/pr/9")]
    pub revision: String,

    #[arg(long, default_value = "lmz/candle-marian")]
    pub tokenizer_repo: String,

    #[arg(long, default_value = "tokenizer-marian-base-en-fr-en.json")]
    pub source_tokenizer: String,

    #[arg(long, default_value = "tokenizer-marian-base-en-fr-fr.json")]
    pub target_tokenizer: String,

    /// Echoed when a request leaves `target_language` out
    #[arg(long, default_value = "fr")]
    pub target_language: String,

    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    #[arg(long)]
    pub cpu: bool,

    #[arg(long, env)]
    pub hf_token: Option<String>,

    /// Translations allowed to run at the same time
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_concurrency: u32,

    /// How long a request may wait for a free slot; 0 rejects immediately
    #[arg(long, default_value_t = 30)]
    pub queue_timeout_secs: u64,

    /// Cap on generated tokens; defaults to the model's max positions
    #[arg(long)]
    pub max_decode_len: Option<usize>,

    #[arg(short, long)]
    pub interactive: bool,

    /// Translate this text once and exit
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DecodeConfig {
    pub max_decode_len: Option<usize>,
}

impl From<&Args> for DecodeConfig {
    fn from(args: &Args) -> Self {
        Self {
            max_decode_len: args.max_decode_len,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub default_target_language: String,
    pub max_concurrency: usize,
    pub queue_timeout: Duration,
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            default_target_language: args.target_language.clone(),
            max_concurrency: args.max_concurrency as usize,
            queue_timeout: Duration::from_secs(args.queue_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8000() {
        let args = Args::parse_from(["translation-server"]);
        assert_eq!(args.host, "0.0.0.0");
        assert_eq!(args.port, 8000);
        assert_eq!(args.model, "Helsinki-NLP/opus-mt-en-fr");
        assert_eq!(args.target_language, "fr");
        assert!(args.text.is_none());
    }

    #[test]
    fn server_config_from_args() {
        let args = Args::parse_from([
            "translation-server",
            "--max-concurrency",
            "2",
            "--queue-timeout-secs",
            "0",
        ]);
        let config = ServerConfig::from(&args);
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.queue_timeout, Duration::ZERO);
        assert_eq!(config.default_target_language, "fr");
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let result = Args::try_parse_from(["translation-server", "--max-concurrency", "0"]);
        assert!(result.is_err());
    }
}
