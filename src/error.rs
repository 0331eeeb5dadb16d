use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::stats::PredictError;

/// Errors surfaced at the HTTP boundary. Each one becomes `{"error": msg}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is absent or malformed
    #[error("{0}")]
    Validation(String),

    /// A referenced pool, team or player does not exist
    #[error("{0}")]
    NotFound(String),

    /// Anything else that went wrong while building the response
    #[error("{0}")]
    Computation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PredictError> for AppError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::MissingInput => AppError::Validation(e.to_string()),
            PredictError::TeamNotFound(_) => AppError::NotFound(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Computation(format!("{:#}", e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_map_to_status() {
        let missing: AppError = PredictError::MissingInput.into();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "Missing team names");

        let unknown: AppError = PredictError::TeamNotFound("Atlantis".into()).into();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.to_string(), "Team data not found");
    }

    #[test]
    fn anyhow_errors_become_computation_errors() {
        let e: AppError = anyhow::anyhow!("disk on fire").into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.to_string(), "disk on fire");
    }
}
