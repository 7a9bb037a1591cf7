mod api;
mod config;
mod device;
mod error;
mod model;
mod sampling;
mod tokenizer;
mod translation;

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::config::{Args, DecodeConfig, ServerConfig};
use crate::device::{device_label, select_device};
use crate::model::{fetch_model_files, language_pair, MarianModel};
use crate::tokenizer::TokenizerPair;
use crate::translation::{MarianTranslator, Translator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "translation_server=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let device = select_device(args.cpu)?;
    info!("Using device: {}", device_label(&device));

    let pair = language_pair(&args.model);
    match &pair {
        Some((source, target)) => {
            info!("Language pair: {} -> {}", source, target);
            if *target != args.target_language {
                warn!(
                    "Default target language '{}' does not match the model's '{}'",
                    args.target_language, target
                );
            }
        }
        None => warn!("Could not infer the language pair from '{}'", args.model),
    }

    // Any failure here ends the process before a socket is opened.
    let files = fetch_model_files(&args)?;
    let tokenizers = TokenizerPair::load(&files.source_tokenizer, &files.target_tokenizer)?;
    let model = MarianModel::load(&files, &device)?;

    info!(
        "Vocabulary sizes: source={}, target={}",
        tokenizers.source.vocab_size(),
        tokenizers.target.vocab_size()
    );

    let translator: Arc<dyn Translator> = Arc::new(MarianTranslator::new(
        model,
        tokenizers,
        args.model.clone(),
        pair.map(|(_, target)| target),
        &DecodeConfig::from(&args),
    ));
    info!("Model loaded and ready.");

    if args.interactive {
        run_interactive_mode(translator.as_ref(), &args)?;
    } else if let Some(text) = &args.text {
        run_single_text(translator.as_ref(), text, &args)?;
    } else {
        run_server(translator, &args).await?;
    }

    Ok(())
}

fn run_single_text(translator: &dyn Translator, text: &str, args: &Args) -> anyhow::Result<()> {
    let output = translator.translate(text, &args.target_language)?;

    println!("{}", output.text);
    info!(
        "{} tokens, {:.2} tokens/sec, {}ms total",
        output.tokens.len(),
        output.tokens_per_second,
        output.total_time_ms
    );

    Ok(())
}

fn run_interactive_mode(translator: &dyn Translator, args: &Args) -> anyhow::Result<()> {
    println!(
        "Translating with {} (type 'exit' or Ctrl+D to quit)\n",
        translator.name()
    );

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match translator.translate(input, &args.target_language) {
            Ok(output) => println!("{}\n", output.text),
            Err(e) => error!("Translation failed: {}", e),
        }
    }

    Ok(())
}

async fn run_server(translator: Arc<dyn Translator>, args: &Args) -> anyhow::Result<()> {
    let server_config = ServerConfig::from(args);
    let state = Arc::new(AppState::new(translator, &server_config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::new(args.host.parse()?, args.port);

    info!(
        "Listening on http://{} (model {}, {} workers, queue timeout {:?})",
        addr, args.model, server_config.max_concurrency, server_config.queue_timeout
    );
    info!("Endpoints: GET / (liveness), POST /translate/");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
