//! Shared builders for service tests.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{Duration, Utc};

use super::CouponService;
use crate::cache::BoundedCache;
use crate::models::{Cart, CartItem, Coupon, DiscountType, UsageType};
use crate::store::{CouponStore, InMemoryCouponStore};

/// An active multi-use coupon valid for a day either side of now, applying
/// to the item `item-1`.
pub fn coupon(code: &str) -> Coupon {
    let now = Utc::now();
    Coupon {
        code: code.to_string(),
        discount_type: DiscountType::Percentage,
        discount_value: 10.0,
        min_order_value: 0.0,
        max_discount: 50.0,
        start_date: now - Duration::days(1),
        end_date: now + Duration::days(1),
        usage_limit: 10,
        usage_count: 0,
        usage_type: UsageType::MultiUse,
        is_active: true,
        applicable_categories: Default::default(),
        applicable_item_ids: ["item-1".to_string()].into_iter().collect(),
        created_at: now,
        updated_at: now,
    }
}

pub fn cart(ids: &[&str], total: f64) -> Cart {
    Cart::new(ids.iter().map(|id| CartItem::new(*id, 10.0)).collect(), total)
}

pub fn cache() -> Arc<BoundedCache> {
    Arc::new(BoundedCache::new(NonZeroUsize::new(100).unwrap()))
}

/// Service over an in-memory store seeded with `coupons`.
pub fn service_with(coupons: Vec<Coupon>) -> (CouponService, Arc<InMemoryCouponStore>) {
    let store = Arc::new(InMemoryCouponStore::with_coupons(coupons));
    let service = CouponService::new(store.clone() as Arc<dyn CouponStore>, cache());
    (service, store)
}
