//! Cache key derivation
//!
//! A cache key is `<namespace>:<digest>` where the digest is the lowercase
//! hex SHA-256 of the canonical JSON encoding of the call inputs.
//!
//! ## Canonical encoding
//!
//! 1. Inputs are converted to a [`serde_json::Value`].
//! 2. Every JSON object is rebuilt with its keys in ascending order, so map
//!    iteration order (keyword ordering, `HashMap` seeds) never leaks into
//!    the key.
//! 3. Arrays keep their order: positional inputs are order-sensitive.
//! 4. The value is written as compact JSON and fed to SHA-256.
//!
//! The encoding depends only on the input values, never on memory layout
//! or a per-process hash seed, so keys are stable across restarts and
//! across processes sharing one store.

use crate::constants::{CACHE_KEY_DELIMITER, CACHE_KEY_DIGEST_HEX_LEN, CACHE_NAMESPACE_MAX_LEN};
use crate::codec::to_checked_value;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;

/// Key identifying one (namespace, inputs) pair in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `inputs` under `namespace`
    ///
    /// # Example
    ///
    /// ```
    /// use memo_domain::CacheKey;
    ///
    /// let key = CacheKey::derive("sq", &(4,)).unwrap();
    /// assert!(key.as_str().starts_with("sq:"));
    /// assert_eq!(key, CacheKey::derive("sq", &(4,)).unwrap());
    /// ```
    pub fn derive<A>(namespace: &str, inputs: &A) -> Result<Self>
    where
        A: Serialize + ?Sized,
    {
        Self::validate_namespace(namespace)?;
        let digest = input_digest(inputs)?;
        Ok(Self(format!("{namespace}{CACHE_KEY_DELIMITER}{digest}")))
    }

    /// Validate a namespace prefix
    ///
    /// Namespaces must be non-empty, at most
    /// [`CACHE_NAMESPACE_MAX_LEN`] bytes, and free of the delimiter,
    /// whitespace and control characters.
    pub fn validate_namespace(namespace: &str) -> Result<()> {
        if namespace.is_empty() {
            return Err(Error::configuration("Cache namespace cannot be empty"));
        }

        if namespace.len() > CACHE_NAMESPACE_MAX_LEN {
            return Err(Error::configuration(format!(
                "Cache namespace too long (max {CACHE_NAMESPACE_MAX_LEN} characters)"
            )));
        }

        if namespace
            .chars()
            .any(|c| c == CACHE_KEY_DELIMITER || c.is_control() || c.is_whitespace())
        {
            return Err(Error::configuration(format!(
                "Cache namespace '{namespace}' contains invalid characters"
            )));
        }

        Ok(())
    }

    /// The full key string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace part of the key
    pub fn namespace(&self) -> &str {
        self.0
            .rsplit_once(CACHE_KEY_DELIMITER)
            .map_or(self.0.as_str(), |(ns, _)| ns)
    }

    /// The hex digest part of the key
    pub fn digest(&self) -> &str {
        let start = self.0.len().saturating_sub(CACHE_KEY_DIGEST_HEX_LEN);
        &self.0[start..]
    }

    /// Consume the key into its string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical JSON encoding of call inputs (sorted object keys, compact)
///
/// Inputs holding `NaN` or an infinity are rejected rather than encoded as
/// `null`.
pub fn canonical_encoding<A>(inputs: &A) -> Result<String>
where
    A: Serialize + ?Sized,
{
    let value = to_checked_value(inputs)?;
    serde_json::to_string(&canonicalize(value))
        .map_err(|e| Error::serialization("Failed to write canonical call inputs", e))
}

/// Lowercase hex SHA-256 of the canonical encoding of `inputs`
pub fn input_digest<A>(inputs: &A) -> Result<String>
where
    A: Serialize + ?Sized,
{
    let encoded = canonical_encoding(inputs)?;
    Ok(hex::encode(Sha256::digest(encoded.as_bytes())))
}

// Rebuilding objects in sorted order keeps the output independent of
// whether serde_json's map preserves insertion order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, value) in entries {
                sorted.insert(key, canonicalize(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
