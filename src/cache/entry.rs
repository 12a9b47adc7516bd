//! Cache Entry Module
//!
//! Defines the typed values the result cache can hold.

use std::sync::Arc;

use crate::models::Coupon;

// == Cached Value ==
/// A cached engine result.
///
/// Validation results and applicability lists share one cache, so each
/// entry carries its kind and readers match on it instead of downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// Outcome of a coupon validation
    Validation(bool),
    /// Snapshot of the coupons applicable to a cart
    Applicable(Arc<[Coupon]>),
}

impl CachedValue {
    /// Wraps an applicability result.
    pub fn applicable(coupons: Vec<Coupon>) -> Self {
        CachedValue::Applicable(coupons.into())
    }

    /// Returns the validation outcome, or None for any other kind.
    pub fn as_validation(&self) -> Option<bool> {
        match self {
            CachedValue::Validation(valid) => Some(*valid),
            CachedValue::Applicable(_) => None,
        }
    }

    /// Returns the applicable coupon list, or None for any other kind.
    pub fn as_applicable(&self) -> Option<&[Coupon]> {
        match self {
            CachedValue::Applicable(coupons) => Some(coupons),
            CachedValue::Validation(_) => None,
        }
    }

    /// Short name of the entry kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CachedValue::Validation(_) => "validation",
            CachedValue::Applicable(_) => "applicable",
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_accessors() {
        let value = CachedValue::Validation(true);
        assert_eq!(value.as_validation(), Some(true));
        assert!(value.as_applicable().is_none());
        assert_eq!(value.kind(), "validation");
    }

    #[test]
    fn test_applicable_accessors() {
        let value = CachedValue::applicable(Vec::new());
        assert_eq!(value.as_validation(), None);
        assert_eq!(value.as_applicable().map(<[Coupon]>::len), Some(0));
        assert_eq!(value.kind(), "applicable");
    }

    #[test]
    fn test_clone_shares_coupon_list() {
        let value = CachedValue::applicable(Vec::new());
        let copy = value.clone();
        match (&value, &copy) {
            (CachedValue::Applicable(a), CachedValue::Applicable(b)) => {
                assert!(Arc::ptr_eq(a, b))
            }
            _ => panic!("expected applicable entries"),
        }
    }
}
