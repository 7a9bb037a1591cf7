use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::OwnedSemaphorePermit;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::types::*;
use super::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello_world))
        .route("/translate/", post(translate_text))
        .with_state(state)
}

async fn hello_world() -> Json<&'static str> {
    Json("Hello World")
}

async fn translate_text(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // Parsed by hand so a missing or odd Content-Type does not turn into a rejection.
    let request: TranslateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected translation body: {}", e);
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e));
        }
    };

    // Kept as a 200 so existing clients that inspect the body keep working.
    let source_text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => return Json(ErrorBody::new(NO_TEXT_PROVIDED)).into_response(),
    };

    let target_language = request
        .target_language
        .unwrap_or_else(|| state.default_target_language.clone());

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        "Translation request: text_len={}, target_language={}",
        source_text.len(),
        target_language
    );

    let Some(permit) = acquire_worker(&state).await else {
        warn!(%request_id, "No translation worker free, rejecting");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, SERVER_BUSY);
    };

    let translator = Arc::clone(&state.translator);
    let text = source_text.clone();
    let target = target_language.clone();
    let result = tokio::task::spawn_blocking(move || {
        // Held until the model call returns, even if the client has gone away.
        let _permit = permit;
        translator.translate(&text, &target)
    })
    .await;

    match result {
        Ok(Ok(output)) => {
            info!(
                %request_id,
                "Translation done: {} tokens in {}ms",
                output.tokens.len(),
                output.total_time_ms
            );
            Json(TranslateResponse {
                original_text: source_text,
                translated_text: output.text,
                target_language,
            })
            .into_response()
        }
        Ok(Err(e)) => {
            error!(%request_id, "Translation error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!(%request_id, "Translation worker failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Translation worker failed",
            )
        }
    }
}

async fn acquire_worker(state: &AppState) -> Option<OwnedSemaphorePermit> {
    let workers = Arc::clone(&state.workers);
    if state.queue_timeout.is_zero() {
        return workers.try_acquire_owned().ok();
    }

    match tokio::time::timeout(state.queue_timeout, workers.acquire_owned()).await {
        Ok(Ok(permit)) => Some(permit),
        _ => None,
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
