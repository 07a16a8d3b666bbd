//! API server setup and configuration.

use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::core::batch::BatchProcessor;
use crate::core::config::MedallionConfig;
use crate::{MedallionError, Result};

use super::{
    handlers::{health_handler, info_handler, list_blobs_handler, process_handler},
    types::{ApiSizeLimits, ApiState},
};

/// Parse size limits from the environment.
///
/// `MEDALLION_MAX_REQUEST_BODY_BYTES` sets the maximum request body size in
/// bytes. Falls back to the default (10 MB) if unset, zero or invalid.
fn parse_size_limits_from_env() -> ApiSizeLimits {
    if let Ok(value) = std::env::var("MEDALLION_MAX_REQUEST_BODY_BYTES") {
        match value.parse::<usize>() {
            Ok(bytes) if bytes > 0 => {
                tracing::info!("Request body limit configured from environment: {} bytes", bytes);
                return ApiSizeLimits::new(bytes);
            }
            Ok(_) => tracing::warn!("Invalid MEDALLION_MAX_REQUEST_BODY_BYTES value (must be > 0)"),
            Err(_) => tracing::warn!(
                "Failed to parse MEDALLION_MAX_REQUEST_BODY_BYTES='{}', must be a valid usize",
                value
            ),
        }
    }

    ApiSizeLimits::default()
}

fn cors_layer_from_env() -> CorsLayer {
    if let Ok(origins_str) = std::env::var("MEDALLION_CORS_ORIGINS") {
        let origins: Vec<_> = origins_str
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if !origins.is_empty() {
            tracing::info!("CORS configured with {} explicit allowed origin(s)", origins.len());
            return CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any);
        }

        tracing::warn!("MEDALLION_CORS_ORIGINS set but empty/invalid - falling back to permissive CORS");
    } else {
        tracing::warn!(
            "CORS configured to allow all origins (default). Set MEDALLION_CORS_ORIGINS to a \
             comma-separated list of allowed origins for production"
        );
    }

    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

/// Create the API router around an existing processor.
///
/// Public so the routes can be nested inside another application.
///
/// # Examples
///
/// ```no_run
/// use medallion::api::create_router;
/// use medallion::{BatchProcessor, MemoryBlobStore};
/// use std::sync::Arc;
///
/// # fn main() -> medallion::Result<()> {
/// let processor = BatchProcessor::new(Arc::new(MemoryBlobStore::new()))?;
/// let app = axum::Router::new().nest("/api", create_router(processor));
/// # Ok(())
/// # }
/// ```
pub fn create_router(processor: BatchProcessor) -> Router {
    create_router_with_limits(processor, ApiSizeLimits::default())
}

/// Create the API router with custom size limits.
pub fn create_router_with_limits(processor: BatchProcessor, limits: ApiSizeLimits) -> Router {
    let state = ApiState { processor };

    Router::new()
        .route("/process", post(process_handler))
        .route("/containers/{container}/blobs", get(list_blobs_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .layer(DefaultBodyLimit::max(limits.max_request_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_request_body_bytes))
        .layer(cors_layer_from_env())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server with config file discovery.
///
/// Searches for `medallion.toml` in the current and parent directories and
/// falls back to the default configuration.
///
/// # Examples
///
/// ```no_run
/// use medallion::api::serve;
///
/// #[tokio::main]
/// async fn main() -> medallion::Result<()> {
///     serve("127.0.0.1", 8000).await?;
///     Ok(())
/// }
/// ```
pub async fn serve(host: impl AsRef<str>, port: u16) -> Result<()> {
    let config = match MedallionConfig::discover()? {
        Some(config) => {
            tracing::info!("Loaded configuration from discovered medallion.toml");
            config
        }
        None => {
            tracing::info!("No configuration file found, using defaults");
            MedallionConfig::default()
        }
    };

    serve_with_config(host, port, config).await
}

/// Start the API server with an explicit configuration.
///
/// Request body limits come from the environment, see
/// `MEDALLION_MAX_REQUEST_BODY_BYTES`.
pub async fn serve_with_config(host: impl AsRef<str>, port: u16, config: MedallionConfig) -> Result<()> {
    serve_with_config_and_limits(host, port, config, parse_size_limits_from_env()).await
}

/// Start the API server with explicit configuration and size limits.
pub async fn serve_with_config_and_limits(
    host: impl AsRef<str>,
    port: u16,
    config: MedallionConfig,
    limits: ApiSizeLimits,
) -> Result<()> {
    let ip: IpAddr = host
        .as_ref()
        .parse()
        .map_err(|e| MedallionError::validation(format!("Invalid host address: {}", e)))?;

    let addr = SocketAddr::new(ip, port);
    let processor = BatchProcessor::from_config(&config)?;
    let app = create_router_with_limits(processor, limits);

    tracing::info!(
        storage_root = %config.storage.root.display(),
        "Starting Medallion API server on http://{}:{}",
        ip,
        port
    );

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(MedallionError::Io)?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MedallionError::Other(e.to_string()))?;

    Ok(())
}
