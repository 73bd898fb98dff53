use std::time::Duration;

use reqwest::Client;
use crate::models::{GenerateRequest, GenerateResponse, HealthResponse, TagsResponse};

pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub const EMPTY_REPLY: &str = "(No response from model.)";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Cannot reach Ollama. Is it running? Start with: ollama serve && ollama run {model}")]
    Unreachable { model: String },
    #[error("Ollama request timed out.")]
    Timeout,
    #[error("{0}")]
    Other(String)
}

impl BackendError {

    fn classify(err: reqwest::Error, model: &str) -> Self {

        // connect timeouts count as unreachable, not as a slow model
        if err.is_connect() {
            BackendError::Unreachable { model: model.to_string() }
        } else if err.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Other(err.to_string())
        }

    }

}

pub async fn generate(
    client: &Client,
    endpoint: &str,
    model: &str,
    prompt: &str
) -> Result<String, BackendError> {

    let request = GenerateRequest { model, prompt, stream: false };

    let response = client
        .post(format!("{}/api/generate", endpoint))
        .timeout(GENERATE_TIMEOUT)
        .json(&request)
        .send()
        .await
        .map_err(|e| BackendError::classify(e, model))?;

    let generated: GenerateResponse = response
        .error_for_status()
        .map_err(|e| BackendError::classify(e, model))?
        .json()
        .await
        .map_err(|e| BackendError::classify(e, model))?;

    let reply = generated.response.trim();
    if reply.is_empty() {
        return Ok(EMPTY_REPLY.to_string());
    }

    Ok(reply.to_string())

}

async fn list_models(client: &Client, endpoint: &str) -> Result<Vec<String>, reqwest::Error> {

    let tags: TagsResponse = client
        .get(format!("{}/api/tags", endpoint))
        .timeout(PROBE_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(tags.models.into_iter().map(|m| m.name).collect())

}

/// Liveness check against the backend. Failures are reported in the payload, never returned.
pub async fn probe(client: &Client, endpoint: &str) -> HealthResponse {

    match list_models(client, endpoint).await {
        Ok(models) => HealthResponse::ok(models),
        Err(e) => {
            tracing::warn!(error = %e, "ollama probe failed");
            HealthResponse::error(e.to_string())
        }
    }

}
