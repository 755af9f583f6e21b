//! Error types for the pricing API.
//!
//! Three error domains, three status classes:
//! - a bad request (dimensions, selectors) is the caller's fault → 400
//! - malformed catalog configuration is the operator's fault → 500
//! - a catalog round-trip failure is the collaborator's fault → 502
//!
//! The domains never blur: a configuration error is not dressed up as a
//! validation error, and no fabricated price is ever returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use tuval_catalog::CatalogError;
use tuval_core::{ConfigError, CoreError, ValidationError};

/// Pricing API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::Validation(e),
            CoreError::Config(e) => ApiError::Config(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
