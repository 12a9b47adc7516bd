//! In-Memory Coupon Store
//!
//! HashMap-backed `CouponStore` used by the server binary and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::CouponStore;
use crate::error::StoreError;
use crate::models::Coupon;

/// Coupon records keyed by code.
#[derive(Debug, Default)]
pub struct InMemoryCouponStore {
    coupons: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryCouponStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `coupons`, keeping their timestamps.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let coupons = coupons
            .into_iter()
            .map(|coupon| (coupon.code.clone(), coupon))
            .collect();
        Self {
            coupons: RwLock::new(coupons),
        }
    }

    pub async fn len(&self) -> usize {
        self.coupons.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.coupons.read().await.is_empty()
    }
}

#[async_trait]
impl CouponStore for InMemoryCouponStore {
    async fn create(&self, coupon: &Coupon) -> Result<Coupon, StoreError> {
        let mut coupons = self.coupons.write().await;
        if coupons.contains_key(&coupon.code) {
            return Err(StoreError::AlreadyExists(coupon.code.clone()));
        }

        let now = Utc::now();
        let mut record = coupon.clone();
        record.created_at = now;
        record.updated_at = now;
        coupons.insert(record.code.clone(), record.clone());
        debug!(code = %coupon.code, "stored coupon");
        Ok(record)
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Coupon>, StoreError> {
        Ok(self.coupons.read().await.get(code).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Coupon>, StoreError> {
        Ok(self.coupons.read().await.values().cloned().collect())
    }

    async fn update(&self, coupon: &Coupon) -> Result<(), StoreError> {
        let mut coupons = self.coupons.write().await;
        let stored = coupons
            .get_mut(&coupon.code)
            .ok_or_else(|| StoreError::NotFound(coupon.code.clone()))?;

        let created_at = stored.created_at;
        *stored = coupon.clone();
        stored.created_at = created_at;
        stored.updated_at = Utc::now();
        Ok(())
    }
}
