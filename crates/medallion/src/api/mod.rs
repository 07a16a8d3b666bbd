//! REST API for triggering extraction batches.
//!
//! # Endpoints
//!
//! - `POST /process` - Extract text for a list of blob references
//! - `GET /containers/{container}/blobs` - List the blobs of a container
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information and supported formats
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use medallion::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> medallion::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Extract two documents
//! curl -X POST http://localhost:8000/process \
//!      -H 'content-type: application/json' \
//!      -d '{"blobs":[{"container":"bronze","name":"report.docx"},{"container":"bronze","name":"scan.pdf"}]}'
//!
//! # List uploaded documents
//! curl http://localhost:8000/containers/bronze/blobs
//!
//! # Health check
//! curl http://localhost:8000/health
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_limits, serve, serve_with_config, serve_with_config_and_limits};
pub use types::{
    ApiSizeLimits, ApiState, BlobListResponse, ErrorResponse, FormatInfo, HealthResponse, InfoResponse, ProcessRequest,
};
