//! API Module
//!
//! HTTP handlers and routing for the coupon service REST API.
//!
//! # Endpoints
//! - `POST /v1/coupons` - Create a coupon
//! - `POST /v1/coupons/validate` - Validate a coupon against a cart
//! - `GET|POST /v1/coupons/applicable` - Coupons applicable to a cart
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
