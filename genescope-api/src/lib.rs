//! Genescope API - REST layer for the expression browser.
//!
//! Wires the analyzed dataset, plot builders, caches, and the publication
//! service into an Axum application. Handlers return `ApiResult<Json<T>>`
//! so they are directly callable from tests without a running server.

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;
