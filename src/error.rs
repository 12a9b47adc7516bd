//! Error types for the coupon service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a `CouponStore` backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A coupon with this code already exists
    #[error("Coupon already exists: {0}")]
    AlreadyExists(String),

    /// The coupon to update does not exist
    #[error("Coupon not found: {0}")]
    NotFound(String),

    /// The backend failed to serve the request
    #[error("Store backend error: {0}")]
    Backend(String),
}

// == Coupon Error Enum ==
/// Unified error type for the coupon service.
#[derive(Error, Debug)]
pub enum CouponError {
    /// Propagated unchanged from the coupon store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache key parameters could not be serialized
    #[error("Cache key derivation failed: {0}")]
    KeyDerivation(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = match &self {
            CouponError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CouponError::Store(StoreError::AlreadyExists(_)) => StatusCode::CONFLICT,
            CouponError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            CouponError::Store(StoreError::Backend(_)) | CouponError::KeyDerivation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the coupon service.
pub type Result<T> = std::result::Result<T, CouponError>;
