//! Redacting wrapper for secrets
//!
//! Ranking services may require an API key. Keeping it inside
//! `Sensitive<T>` means a `{:?}` of the config or a tracing field never
//! prints the key.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Wrapper whose Debug and Display output is always redacted
///
/// # Example
///
/// ```
/// use rankdiff_core_types::Sensitive;
///
/// let key = Sensitive::new("dn_abc123");
/// assert_eq!(format!("{:?}", key), "***REDACTED***");
/// assert_eq!(key.expose(), &"dn_abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the underlying value (e.g. to build an auth header)
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sensitive<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Sensitive)
    }
}
