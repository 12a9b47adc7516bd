//! Coupon and Cart Models
//!
//! Domain records shared by the store, the cache and the matching engine.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Discount Type ==
/// How a coupon's discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Flat,
}

// == Usage Type ==
/// Redemption policy of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageType {
    OneTime,
    MultiUse,
    TimeBased,
}

// == Coupon ==
/// A promotional coupon as persisted by a `CouponStore`.
///
/// The store owns these records. Copies held by the cache are snapshots
/// and may lag behind the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique coupon code
    pub code: String,
    /// Percentage or flat amount
    pub discount_type: DiscountType,
    /// Percent off or flat amount, depending on `discount_type`
    pub discount_value: f64,
    /// Minimum cart total required for the coupon to apply
    pub min_order_value: f64,
    /// Upper bound on the discount granted
    pub max_discount: f64,
    /// Start of the validity window (inclusive)
    pub start_date: DateTime<Utc>,
    /// End of the validity window (inclusive)
    pub end_date: DateTime<Utc>,
    /// Maximum number of redemptions
    pub usage_limit: u32,
    /// Redemptions so far; only grows through successful validation
    #[serde(default)]
    pub usage_count: u32,
    /// Redemption policy
    pub usage_type: UsageType,
    /// Inactive coupons never validate or apply
    pub is_active: bool,
    /// Category identifiers, matched against cart item ids
    #[serde(default, alias = "applicable_items")]
    pub applicable_categories: BTreeSet<String>,
    /// Item identifiers, matched against cart item ids
    #[serde(default, alias = "applicable_medicine_ids")]
    pub applicable_item_ids: BTreeSet<String>,
    /// Set by the store on creation
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// Returns true once the coupon has been redeemed `usage_limit` times.
    pub fn is_exhausted(&self) -> bool {
        self.usage_count >= self.usage_limit
    }
}

// == Cart ==
/// A single line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Item identifier, matched against coupon item and category ids
    pub id: String,
    /// Unit price
    #[serde(default)]
    pub price: f64,
}

impl CartItem {
    pub fn new(id: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }
}

/// A transient shopping cart, built per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Lines of the cart
    #[serde(default, alias = "cart_items")]
    pub items: Vec<CartItem>,
    /// Order total compared against `min_order_value`
    pub total: f64,
}

impl Cart {
    pub fn new(items: Vec<CartItem>, total: f64) -> Self {
        Self { items, total }
    }

    /// Iterates over the identifiers of every item in the cart.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon() -> Coupon {
        let now = Utc::now();
        Coupon {
            code: "SAVE".to_string(),
            discount_type: DiscountType::Flat,
            discount_value: 5.0,
            min_order_value: 0.0,
            max_discount: 0.0,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(1),
            usage_limit: 1,
            usage_count: 0,
            usage_type: UsageType::OneTime,
            is_active: true,
            applicable_categories: BTreeSet::new(),
            applicable_item_ids: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_usage_type_wire_names() {
        let json = serde_json::to_string(&UsageType::OneTime).unwrap();
        assert_eq!(json, r#""one_time""#);
        let parsed: UsageType = serde_json::from_str(r#""time_based""#).unwrap();
        assert_eq!(parsed, UsageType::TimeBased);
    }

    #[test]
    fn test_coupon_accepts_legacy_field_names() {
        let json = r#"{
            "code": "MED10",
            "discount_type": "flat",
            "discount_value": 10.0,
            "min_order_value": 0.0,
            "max_discount": 0.0,
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2030-01-01T00:00:00Z",
            "usage_limit": 5,
            "usage_type": "multi_use",
            "is_active": true,
            "applicable_items": ["painkillers"],
            "applicable_medicine_ids": ["med_1", "med_2"],
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert!(coupon.applicable_categories.contains("painkillers"));
        assert_eq!(coupon.applicable_item_ids.len(), 2);
        assert_eq!(coupon.usage_count, 0);
    }

    #[test]
    fn test_is_exhausted() {
        let mut c = coupon();
        assert!(!c.is_exhausted());
        c.usage_count = 1;
        assert!(c.is_exhausted());
    }

    #[test]
    fn test_cart_item_ids() {
        let cart = Cart::new(vec![CartItem::new("a", 1.0), CartItem::new("b", 2.0)], 3.0);
        let ids: Vec<&str> = cart.item_ids().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
