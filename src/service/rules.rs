//! Eligibility Rules
//!
//! Predicates shared by coupon validation and the applicability query.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Cart, Coupon, UsageType};

/// Why a coupon does not apply to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("coupon is inactive")]
    Inactive,
    #[error("outside validity window")]
    OutsideWindow,
    #[error("cart total below minimum order value")]
    BelowMinimum,
    #[error("usage limit reached")]
    UsageExhausted,
    #[error("no cart item matches the coupon")]
    NoMatchingItem,
}

/// Which coupons have their usage limit enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitPolicy {
    OneTimeOnly,
    AllUsageTypes,
}

/// Rules applied before redeeming a coupon.
///
/// The usage limit is only enforced for `one_time` coupons here, unlike
/// [`check_applicable`] which enforces it for every usage type.
pub fn check_redeemable(coupon: &Coupon, cart: &Cart, now: DateTime<Utc>) -> Result<(), Rejection> {
    check(coupon, cart, now, LimitPolicy::OneTimeOnly)
}

/// Rules applied when listing the coupons applicable to a cart.
pub fn check_applicable(coupon: &Coupon, cart: &Cart, now: DateTime<Utc>) -> Result<(), Rejection> {
    check(coupon, cart, now, LimitPolicy::AllUsageTypes)
}

fn check(
    coupon: &Coupon,
    cart: &Cart,
    now: DateTime<Utc>,
    policy: LimitPolicy,
) -> Result<(), Rejection> {
    if !coupon.is_active {
        return Err(Rejection::Inactive);
    }
    if !within_window(coupon, now) {
        return Err(Rejection::OutsideWindow);
    }
    if cart.total < coupon.min_order_value {
        return Err(Rejection::BelowMinimum);
    }
    let limit_enforced = match policy {
        LimitPolicy::OneTimeOnly => coupon.usage_type == UsageType::OneTime,
        LimitPolicy::AllUsageTypes => true,
    };
    if limit_enforced && coupon.is_exhausted() {
        return Err(Rejection::UsageExhausted);
    }
    if !matches_cart(coupon, cart) {
        return Err(Rejection::NoMatchingItem);
    }
    Ok(())
}

/// Both ends of the window are inclusive.
pub fn within_window(coupon: &Coupon, now: DateTime<Utc>) -> bool {
    coupon.start_date <= now && now <= coupon.end_date
}

/// True when a cart item id is one of the coupon's item ids, or failing
/// that, one of its category ids.
///
/// Cart items carry no category, so categories are compared against the
/// item ids as well.
pub fn matches_cart(coupon: &Coupon, cart: &Cart) -> bool {
    cart.item_ids()
        .any(|id| coupon.applicable_item_ids.contains(id))
        || cart
            .item_ids()
            .any(|id| coupon.applicable_categories.contains(id))
}
