use serde::{Deserialize, Serialize};

// Wire types for the browser facing API

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String
}

impl ChatTurn {

    pub fn is_user(&self) -> bool {

        self.role == "user"

    }

}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub model: String
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub password: String
}

#[derive(Debug, Serialize)]
pub struct AuthOk {
    pub ok: bool
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(rename = "authRequired")]
    pub auth_required: bool
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub ollama: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>
}

impl HealthResponse {

    pub fn ok(models: Vec<String>) -> Self {

        HealthResponse { ollama: "ok", models: Some(models), detail: None }

    }

    pub fn error(detail: impl Into<String>) -> Self {

        HealthResponse { ollama: "error", models: None, detail: Some(detail.into()) }

    }

}

// Wire types for the Ollama API

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String
}

#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>
}

#[derive(Debug, Deserialize)]
pub struct TagEntry {
    pub name: String
}
