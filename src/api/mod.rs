mod routes;
mod types;

pub use routes::create_router;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::ServerConfig;
use crate::translation::Translator;

/// Shared application state, built once at startup and read-only afterwards.
pub struct AppState {
    pub translator: Arc<dyn Translator>,
    pub default_target_language: String,
    /// Permits bound the number of translations on the blocking pool.
    pub workers: Arc<Semaphore>,
    pub queue_timeout: Duration,
}

impl AppState {
    pub fn new(translator: Arc<dyn Translator>, config: &ServerConfig) -> Self {
        Self {
            translator,
            default_target_language: config.default_target_language.clone(),
            workers: Arc::new(Semaphore::new(config.max_concurrency)),
            queue_timeout: config.queue_timeout,
        }
    }
}
