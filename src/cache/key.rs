//! Cache Key Derivation
//!
//! Builds cache keys from a prefix and the parameters of a lookup.

use serde::Serialize;

/// Prefix of validation result keys.
pub const VALIDATE_PREFIX: &str = "validate";

/// Prefix of applicability result keys.
pub const APPLICABLE_PREFIX: &str = "applicable";

/// Derives a cache key as `"{prefix}:{json}"` where `json` is the
/// serialized `params`.
///
/// Prefixes never contain `:`, so two calls yield the same key only when
/// both the prefix and the serialized parameters are equal. Pass several
/// parameters as a tuple.
pub fn derive_key<P>(prefix: &str, params: &P) -> Result<String, serde_json::Error>
where
    P: Serialize + ?Sized,
{
    debug_assert!(!prefix.contains(':'), "cache key prefix must not contain ':'");
    let encoded = serde_json::to_string(params)?;
    Ok(format!("{}:{}", prefix, encoded))
}
