//! API request handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};

use crate::MedallionError;
use crate::core::naming::{DESTINATION_CONTAINER, SOURCE_CONTAINER};
use crate::types::BatchOutcome;

use super::{
    error::ApiError,
    types::{ApiState, BlobListResponse, FormatInfo, HealthResponse, InfoResponse, ProcessRequest},
};

/// Batch processing endpoint handler.
///
/// POST /process
///
/// Body: `{"blobs": [{"container": "bronze", "name": "report.docx"}, ...]}`.
///
/// - 200 with the outcome when no reference failed
/// - 500 with the outcome when at least one reference failed
/// - 400 `{"error": "No blobs provided."}` when the list is missing, null or empty
/// - 400 when the body is not valid JSON of that shape
pub async fn process_handler(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<(StatusCode, Json<BatchOutcome>), ApiError> {
    let request: ProcessRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ProcessRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::validation(MedallionError::validation_with_source(
                format!("Invalid request body: {}", e),
                e,
            ))
        })?
    };

    let references = request.blobs.unwrap_or_default();
    let outcome = state.processor.process_batch(&references).await?;

    let status = if outcome.has_errors() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome)))
}

/// Blob listing endpoint handler.
///
/// GET /containers/{container}/blobs
pub async fn list_blobs_handler(
    State(state): State<ApiState>,
    Path(container): Path<String>,
) -> Result<Json<BlobListResponse>, ApiError> {
    let blobs = state.processor.store().list_blobs(&container).await?;
    Ok(Json(BlobListResponse { container, blobs }))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Result<Json<InfoResponse>, ApiError> {
    let formats = {
        let registry = state.processor.registry().read().map_err(|e| {
            ApiError::internal(MedallionError::LockPoisoned(format!("Document extractor registry: {}", e)))
        })?;

        registry
            .extensions()
            .into_iter()
            .filter_map(|extension| {
                let extractor = registry.get(&extension).ok()?;
                Some(FormatInfo {
                    format: extractor.format_label().to_string(),
                    extractor: extractor.name().to_string(),
                    extension,
                })
            })
            .collect()
    };

    Ok(Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_container: SOURCE_CONTAINER.to_string(),
        destination_container: DESTINATION_CONTAINER.to_string(),
        formats,
    }))
}
