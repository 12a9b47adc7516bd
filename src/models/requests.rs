//! Request DTOs for the coupon API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::coupon::{Cart, CartItem, Coupon, DiscountType, UsageType};

/// Request body for coupon creation (POST /v1/coupons)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub min_order_value: f64,
    #[serde(default)]
    pub max_discount: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub usage_limit: u32,
    pub usage_type: UsageType,
    /// Defaults to true when omitted
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, alias = "applicable_items")]
    pub applicable_categories: BTreeSet<String>,
    #[serde(default, alias = "applicable_medicine_ids")]
    pub applicable_item_ids: BTreeSet<String>,
}

fn default_active() -> bool {
    true
}

impl CreateCouponRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.code.trim().is_empty() {
            return Some("Coupon code cannot be empty".to_string());
        }
        if self.start_date > self.end_date {
            return Some("start_date must not be after end_date".to_string());
        }
        if self.discount_value < 0.0 || self.min_order_value < 0.0 || self.max_discount < 0.0 {
            return Some("Monetary values cannot be negative".to_string());
        }
        if self.discount_type == DiscountType::Percentage && self.discount_value > 100.0 {
            return Some("Percentage discount cannot exceed 100".to_string());
        }
        None
    }

    /// Builds the coupon record to persist, with a zero usage count.
    pub fn into_coupon(self, now: DateTime<Utc>) -> Coupon {
        Coupon {
            code: self.code,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_value: self.min_order_value,
            max_discount: self.max_discount,
            start_date: self.start_date,
            end_date: self.end_date,
            usage_limit: self.usage_limit,
            usage_count: 0,
            usage_type: self.usage_type,
            is_active: self.is_active,
            applicable_categories: self.applicable_categories,
            applicable_item_ids: self.applicable_item_ids,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for coupon validation (POST /v1/coupons/validate)
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
    pub cart: Cart,
}

/// Request body for the applicability query (/v1/coupons/applicable)
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicableRequest {
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl ApplicableRequest {
    pub fn into_cart(self) -> Cart {
        Cart::new(self.items, self.total)
    }
}
