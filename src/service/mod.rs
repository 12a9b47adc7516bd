//! Coupon Service Module
//!
//! Coupon validation and applicability on top of the result cache and the
//! coupon store.
//!
//! # Locking
//! One service-wide `RwLock` orders the engine operations:
//! - `validate` holds it exclusively, since it may redeem a coupon
//! - `get_applicable` holds it shared, so applicability queries run together
//! - `create_coupon` does not take it
//!
//! The lock serializes unrelated validations too. Store calls run while it is
//! held, so a slow store stalls every pending validation.
//!
//! # Staleness
//! Cached results are snapshots. A cached validation `true` is replayed for
//! the same code and cart until the entry is evicted, without redeeming the
//! coupon again. Applicability keys include an epoch that is bumped on every
//! creation and redemption, which makes older applicability entries
//! unreachable.

mod applicable;
pub mod rules;
mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::BoundedCache;
use crate::error::Result;
use crate::models::Coupon;
use crate::store::CouponStore;

pub use rules::Rejection;

// == Coupon Service ==
/// Shared coupon engine. Clone the surrounding `Arc` to share it.
pub struct CouponService {
    store: Arc<dyn CouponStore>,
    cache: Arc<BoundedCache>,
    lock: RwLock<()>,
    /// Generation of applicability results
    epoch: AtomicU64,
}

impl CouponService {
    pub fn new(store: Arc<dyn CouponStore>, cache: Arc<BoundedCache>) -> Self {
        Self {
            store,
            cache,
            lock: RwLock::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    pub fn cache(&self) -> &Arc<BoundedCache> {
        &self.cache
    }

    pub fn store(&self) -> &Arc<dyn CouponStore> {
        &self.store
    }

    // == Create ==
    /// Persists a new coupon and invalidates cached applicability results.
    /// Returns the record as stored, with store-assigned timestamps.
    ///
    /// Runs without the service lock. The store insert completes before the
    /// epoch moves, and readers capture the epoch before reading the store,
    /// so a concurrent applicability query cannot cache a list missing this
    /// coupon under the new epoch.
    #[tracing::instrument(name = "coupons.create", skip(self, coupon), fields(code = %coupon.code), err)]
    pub async fn create_coupon(&self, coupon: &Coupon) -> Result<Coupon> {
        let stored = self.store.create(coupon).await?;
        self.bump_epoch();
        info!("created coupon");
        Ok(stored)
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for CouponService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouponService")
            .field("cache", &self.cache)
            .field("epoch", &self.current_epoch())
            .finish_non_exhaustive()
    }
}
