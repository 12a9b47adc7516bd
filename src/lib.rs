//! Coupon Cache - coupon validation and applicability service
//!
//! Decides whether a coupon applies to a cart and lists the coupons
//! applicable to a cart, fronting a coupon store with a bounded LRU cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use service::CouponService;
