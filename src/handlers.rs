use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use crate::AppState;
use crate::client::{self, BackendError};
use crate::error::AppError;
use crate::logger::record_request;
use crate::models::{AuthOk, AuthRequest, ChatReply, ChatRequest, ConfigResponse, HealthResponse};
use crate::prompt::{self, SYSTEM_PROMPT};

pub async fn auth(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>
) -> Result<Json<AuthOk>, AppError> {

    state.auth.verify_password(&body.password)?;
    Ok(Json(AuthOk { ok: true }))

}

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>
) -> Result<Json<ChatReply>, AppError> {

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    state.auth.authorize_bearer(authorization)?;

    let history = request.history.unwrap_or_default();
    let turns_used = prompt::recent_turns(&history).len();
    let prompt = prompt::compose(SYSTEM_PROMPT, &history, &request.message);

    let model = &state.config.ollama_model;
    tracing::debug!(model = %model, turns = turns_used, prompt_chars = prompt.len(), "forwarding chat to ollama");

    let started = Instant::now();
    let result = client::generate(&state.http_client, &state.config.ollama_url, model, &prompt).await;
    let latency_ms = started.elapsed().as_millis();

    let outcome = match &result {
        Ok(_) => "ok",
        Err(BackendError::Unreachable { .. }) => "backend_unreachable",
        Err(BackendError::Timeout) => "backend_timeout",
        Err(BackendError::Other(_)) => "backend_error"
    };
    record_request(state.config.log_path.clone(), outcome, model.clone(), turns_used, latency_ms).await;

    let reply = result?;
    tracing::info!(model = %model, latency_ms = latency_ms as u64, "chat reply generated");

    Ok(Json(ChatReply { reply, model: model.clone() }))

}

pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {

    Json(ConfigResponse { auth_required: state.auth.is_required() })

}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {

    Json(client::probe(&state.http_client, &state.config.ollama_url).await)

}
