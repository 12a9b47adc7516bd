//! API Routes
//!
//! Configures the Axum router with all coupon service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    applicable_handler, create_coupon_handler, health_handler, stats_handler, validate_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /v1/coupons` - Create a coupon
/// - `POST /v1/coupons/validate` - Validate and redeem a coupon for a cart
/// - `GET|POST /v1/coupons/applicable` - List coupons applicable to a cart
/// - `GET /stats` - Result cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/coupons", post(create_coupon_handler))
        .route("/v1/coupons/validate", post(validate_handler))
        .route(
            "/v1/coupons/applicable",
            get(applicable_handler).post(applicable_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
