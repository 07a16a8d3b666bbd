//! Mapping of library errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::MedallionError;

use super::types::ErrorResponse;

/// Error returned by API handlers.
///
/// Serialized as [`ErrorResponse`] with the chosen status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: MedallionError,
}

impl ApiError {
    /// 400 Bad Request.
    pub fn validation(error: MedallionError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// 404 Not Found.
    pub fn not_found(error: MedallionError) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error,
        }
    }

    /// 500 Internal Server Error.
    pub fn internal(error: MedallionError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl From<MedallionError> for ApiError {
    fn from(error: MedallionError) -> Self {
        if error.is_client_error() {
            Self::validation(error)
        } else if matches!(error, MedallionError::BlobNotFound { .. }) {
            Self::not_found(error)
        } else {
            Self::internal(error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "Request failed: {}", self.error);
        }

        // Validation messages are already phrased for the client.
        let error = match self.error {
            MedallionError::Validation { message, .. } => message,
            other => other.to_string(),
        };
        let body = ErrorResponse { error };
        (self.status, Json(body)).into_response()
    }
}
