use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Provider credential is not configured
    #[error("TMDB API key missing")]
    Configuration,

    /// Provider answered with a non-success status
    #[error("TMDB error")]
    ProviderStatus(u16),

    /// Provider could not be reached or its body could not be read
    #[error("{context}: {source}")]
    ProviderUnavailable {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered but without the fields we rely on
    #[error("{0}")]
    ProviderMalformedResponse(String),

    /// The recommendation proxy answered with an error body
    #[error("Recommendation service error: {0}")]
    Proxy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Wraps a transport failure with the message surfaced to callers
    pub fn unavailable(context: &'static str, source: reqwest::Error) -> Self {
        AppError::ProviderUnavailable { context, source }
    }

    /// Upstream HTTP status, when the provider returned one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::ProviderStatus(status) => Some(*status),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Proxy(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration
            | AppError::ProviderStatus(_)
            | AppError::ProviderUnavailable { .. }
            | AppError::ProviderMalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::ProviderStatus(upstream) => json!({
                "error": self.to_string(),
                "status": upstream,
            }),
            // Transport details stay in the logs
            AppError::ProviderUnavailable { context, .. } => json!({ "error": context }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
