use crate::speech::SpeechError;
use crate::translation::TranslateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Failures of `/api/translate` that are not caller mistakes.
///
/// Validation problems never become an `AppError`; they are answered with a
/// regular `ok: false` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Translation(#[from] TranslateError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// Translation and synthesis succeeded but the history write did not
    #[error("Failed to save history: {0}")]
    History(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Translation(_) | AppError::Speech(_) => StatusCode::BAD_GATEWAY,
            AppError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Translate request failed: {}", self);
        let body = serde_json::json!({
            "ok": false,
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
