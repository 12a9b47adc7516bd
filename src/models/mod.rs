//! Domain records and request/response models
//!
//! `coupon` holds the records the engine evaluates; `requests` and
//! `responses` are the DTOs used for HTTP bodies.

pub mod coupon;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use coupon::{Cart, CartItem, Coupon, DiscountType, UsageType};
pub use requests::{ApplicableRequest, CreateCouponRequest, ValidateRequest};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse, ValidationResponse};
