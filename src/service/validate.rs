//! Coupon Validation
//!
//! Evaluates one coupon against one cart and redeems it on success.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{rules, CouponService};
use crate::cache::{derive_key, CachedValue, VALIDATE_PREFIX};
use crate::error::Result;
use crate::models::Cart;

impl CouponService {
    // == Validate ==
    /// Checks whether coupon `code` applies to `cart` and redeems it if so.
    ///
    /// Holds the service lock exclusively for the whole call. A cached result
    /// for the same code and cart is returned without consulting the store.
    /// Unknown codes and failed rules yield `Ok(false)` and are not cached.
    /// On success the coupon's usage count is incremented and persisted
    /// before `true` is cached. Store errors are returned unchanged.
    #[tracing::instrument(name = "coupons.validate", skip(self, cart), fields(items = cart.items.len()), err)]
    pub async fn validate(&self, code: &str, cart: &Cart) -> Result<bool> {
        let _guard = self.lock.write().await;

        let key = derive_key(VALIDATE_PREFIX, &(code, cart))?;
        if let Some(cached) = self.cache.get(&key) {
            match cached.as_validation() {
                Some(valid) => {
                    debug!(valid, "validation cache hit");
                    return Ok(valid);
                }
                None => warn!(kind = cached.kind(), "unexpected cache entry kind, recomputing"),
            }
        }

        let Some(mut coupon) = self.store.get_by_code(code).await? else {
            debug!("coupon not found");
            return Ok(false);
        };

        if let Err(reason) = rules::check_redeemable(&coupon, cart, Utc::now()) {
            debug!(%reason, "coupon rejected");
            return Ok(false);
        }

        coupon.usage_count = coupon.usage_count.saturating_add(1);
        self.store.update(&coupon).await?;

        self.cache.set(key, CachedValue::Validation(true));
        self.bump_epoch();

        info!(usage_count = coupon.usage_count, "coupon redeemed");
        Ok(true)
    }
}
