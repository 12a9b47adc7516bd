//! API Handlers
//!
//! HTTP request handlers for each coupon service endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::cache::BoundedCache;
use crate::config::Config;
use crate::error::{CouponError, Result};
use crate::models::{
    ApplicableRequest, Coupon, CreateCouponRequest, HealthResponse, StatsResponse,
    ValidateRequest, ValidationResponse,
};
use crate::service::CouponService;
use crate::store::{CouponStore, InMemoryCouponStore};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Coupon engine shared by every request
    pub service: Arc<CouponService>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: CouponService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState over `store` with a cache of the given capacity.
    pub fn with_store(store: Arc<dyn CouponStore>, config: &Config) -> Self {
        let cache = Arc::new(BoundedCache::new(config.cache_capacity));
        Self::new(CouponService::new(store, cache))
    }

    /// Creates a new AppState from configuration, backed by an in-memory store.
    pub fn from_config(config: &Config) -> Self {
        Self::with_store(Arc::new(InMemoryCouponStore::new()), config)
    }
}

/// Handler for POST /v1/coupons
///
/// Creates a coupon and returns it with status 201.
pub async fn create_coupon_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateCouponRequest>,
) -> Result<(StatusCode, Json<Coupon>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CouponError::InvalidRequest(error_msg));
    }

    let coupon = state
        .service
        .create_coupon(&req.into_coupon(Utc::now()))
        .await?;

    Ok((StatusCode::CREATED, Json(coupon)))
}

/// Handler for POST /v1/coupons/validate
///
/// Validates a coupon against a cart, redeeming it on success.
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidationResponse>> {
    if req.code.trim().is_empty() {
        return Err(CouponError::InvalidRequest(
            "Coupon code cannot be empty".to_string(),
        ));
    }

    let is_valid = state.service.validate(&req.code, &req.cart).await?;
    Ok(Json(ValidationResponse::new(is_valid)))
}

/// Handler for GET|POST /v1/coupons/applicable
///
/// Lists the coupons applicable to a cart.
pub async fn applicable_handler(
    State(state): State<AppState>,
    Json(req): Json<ApplicableRequest>,
) -> Result<Json<Vec<Coupon>>> {
    let cart = req.into_cart();
    let coupons = state.service.get_applicable(&cart).await?;
    Ok(Json(coupons))
}

/// Handler for GET /stats
///
/// Returns result cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache();
    Json(StatsResponse::new(&cache.stats(), cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
