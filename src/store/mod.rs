//! Coupon Store Module
//!
//! Durable coupon storage is reached only through the `CouponStore` trait.

mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::Coupon;

pub use memory::InMemoryCouponStore;

/// Storage contract consumed by the coupon engine.
///
/// Implementations own the persisted records; callers receive copies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponStore: Send + Sync {
    /// Persists a new coupon and returns the stored record.
    ///
    /// Fails with `AlreadyExists` on a duplicate code.
    async fn create(&self, coupon: &Coupon) -> Result<Coupon, StoreError>;

    /// Fetches a coupon by code. `Ok(None)` means not found.
    async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError>;

    /// Fetches every stored coupon.
    async fn get_all(&self) -> Result<Vec<Coupon>, StoreError>;

    /// Replaces the stored coupon with the same code.
    async fn update(&self, coupon: &Coupon) -> Result<(), StoreError>;
}
