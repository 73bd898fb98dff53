use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::AuthError;
use crate::client::BackendError;

/// Everything a handler can fail with, mapped to a status and a `{"detail": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Backend(#[from] BackendError)
}

impl AppError {

    pub fn status(&self) -> StatusCode {

        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Backend(BackendError::Unreachable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Backend(BackendError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Backend(BackendError::Other(_)) => StatusCode::INTERNAL_SERVER_ERROR
        }

    }

}

impl IntoResponse for AppError {

    fn into_response(self) -> Response {

        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        } else {
            tracing::debug!(%status, "{}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()

    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_status_mapping() {

        let cases = [
            (AppError::from(AuthError::InvalidCredential), StatusCode::UNAUTHORIZED),
            (AppError::from(AuthError::MissingOrInvalidCredential), StatusCode::UNAUTHORIZED),
            (AppError::from(AuthError::InvalidBearerToken), StatusCode::UNAUTHORIZED),
            (AppError::from(BackendError::Unreachable { model: "llama3.2".into() }), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::from(BackendError::Timeout), StatusCode::GATEWAY_TIMEOUT),
            (AppError::from(BackendError::Other("boom".into())), StatusCode::INTERNAL_SERVER_ERROR)
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{:?}", err);
        }

    }

    #[test]
    fn test_other_surfaces_raw_message() {

        let err = AppError::from(BackendError::Other("error decoding response body".into()));
        assert_eq!(err.to_string(), "error decoding response body");

    }

}
