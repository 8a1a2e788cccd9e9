//! Typed ledger key for forecast records.
//!
//! The key is derived the same way at create, acknowledge, and read time,
//! so there is at most one live forecast per (upc, store) pair. Use
//! [`ForecastKey`] instead of formatting strings at call sites.

use std::fmt;

/// A typed key for forecast records.
///
/// # Path Format
///
/// `{upc}-{store_nbr}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastKey(String);

impl ForecastKey {
    /// Derives the ledger key for a (upc, store) pair.
    #[must_use]
    pub fn new(upc: &str, store_nbr: &str) -> Self {
        Self(format!("{upc}-{store_nbr}"))
    }
}

impl AsRef<str> for ForecastKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_upc_dash_store() {
        let key = ForecastKey::new("111", "200");
        assert_eq!(key.as_ref(), "111-200");
        assert_eq!(key.to_string(), "111-200");
    }

    #[test]
    fn same_inputs_derive_same_key() {
        assert_eq!(ForecastKey::new("111", "200"), ForecastKey::new("111", "200"));
        assert_ne!(ForecastKey::new("111", "200"), ForecastKey::new("111", "201"));
    }
}
