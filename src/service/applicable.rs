//! Applicable Coupons
//!
//! Lists the coupons eligible for a cart without redeeming any of them.

use chrono::Utc;
use tracing::{debug, warn};

use super::{rules, CouponService};
use crate::cache::{derive_key, CachedValue, APPLICABLE_PREFIX};
use crate::error::Result;
use crate::models::{Cart, Coupon};

impl CouponService {
    // == Get Applicable ==
    /// Returns every coupon applicable to `cart`, ordered by code.
    ///
    /// Holds the service lock in shared mode. Unlike validation, the usage
    /// limit is enforced for every usage type. Each coupon appears at most
    /// once even when both its item ids and its categories match.
    #[tracing::instrument(name = "coupons.applicable", skip(self, cart), fields(items = cart.items.len()), err)]
    pub async fn get_applicable(&self, cart: &Cart) -> Result<Vec<Coupon>> {
        let _guard = self.lock.read().await;

        // Epoch is read before the store so a concurrent creation can only
        // leave a stale list under an epoch nobody reads again.
        let epoch = self.current_epoch();
        let key = derive_key(APPLICABLE_PREFIX, &(epoch, cart))?;
        if let Some(cached) = self.cache.get(&key) {
            match cached.as_applicable() {
                Some(coupons) => {
                    debug!(count = coupons.len(), "applicability cache hit");
                    return Ok(coupons.to_vec());
                }
                None => warn!(kind = cached.kind(), "unexpected cache entry kind, recomputing"),
            }
        }

        let now = Utc::now();
        let mut applicable: Vec<Coupon> = self
            .store
            .get_all()
            .await?
            .into_iter()
            .filter(|coupon| rules::check_applicable(coupon, cart, now).is_ok())
            .collect();
        applicable.sort_by(|a, b| a.code.cmp(&b.code));

        debug!(count = applicable.len(), epoch, "computed applicable coupons");
        self.cache.set(key, CachedValue::applicable(applicable.clone()));
        Ok(applicable)
    }
}
