//! HTTP error responses.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use horizon_core::HorizonError;

/// Failure of an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scenario(#[from] HorizonError),

    #[error("scenario did not finish within {}s", .0.as_secs())]
    Timeout(Duration),

    /// The blocking task running the pipeline panicked or was cancelled.
    #[error("scenario worker failed: {0}")]
    Worker(String),
}

impl ApiError {
    /// HTTP status code for this error.
    ///
    /// - Invalid input, unknown asteroid: 400 Bad Request
    /// - Timeout: 504 Gateway Timeout
    /// - Internal failures: 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Scenario(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Scenario(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Internal details stay in the log
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Scenario failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::from(HorizonError::invalid("diameter_m", "must be a positive number"))
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(HorizonError::UnknownAsteroid("433_eros".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(HorizonError::Internal("scan panicked".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ApiError::Worker("cancelled".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_message_kept() {
        let err = ApiError::from(HorizonError::UnknownAsteroid("433_eros".into()));
        assert_eq!(err.to_string(), "unknown asteroid id: 433_eros");
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(30)).to_string(),
            "scenario did not finish within 30s"
        );
    }
}
