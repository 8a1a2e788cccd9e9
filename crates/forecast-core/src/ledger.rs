//! Versioned key-value ledger abstraction.
//!
//! This module defines the storage contract the forecast contract persists
//! through. The real ledger runtime executes each invocation as an atomic
//! transaction and rejects a commit when a read key was modified by another
//! committed transaction; that discipline surfaces here as versioned reads
//! plus conditional writes.
//!
//! The version token is an opaque `String` so backends are free to use
//! whatever representation their transaction machinery provides. The
//! in-memory implementation uses a per-key integer generation (stored as a
//! string) to simulate that behavior.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};

/// Precondition for conditional writes.
///
/// The version token is opaque - backends interpret it according to their
/// own transaction semantics.
#[derive(Debug, Clone)]
pub enum WritePrecondition {
    /// Write only if the key holds no value.
    DoesNotExist,
    /// Write only if the key's current version matches the given token.
    MatchesVersion(String),
    /// Write unconditionally.
    None,
}

/// Result of a conditional write.
#[derive(Debug, Clone)]
pub enum WriteResult {
    /// Write succeeded, returns new version token.
    Success {
        /// The new version token after the write.
        version: String,
    },
    /// Precondition failed, returns current version token.
    PreconditionFailed {
        /// The current version that caused the precondition to fail.
        current_version: String,
    },
}

/// A value read from the ledger together with its version token.
///
/// The version is what a read-modify-write carries back into
/// [`WritePrecondition::MatchesVersion`] so a concurrent writer is detected
/// rather than silently overwritten.
#[derive(Debug, Clone)]
pub struct VersionedValue {
    /// The stored bytes.
    pub data: Bytes,
    /// Opaque version token for conditional writes.
    pub version: String,
}

/// Ledger store trait.
///
/// All ledger backends (the production transaction substrate, the in-memory
/// test store) implement this trait. One call corresponds to one ledger
/// read or write within the current transaction.
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    /// Reads the value at `key` together with its version.
    ///
    /// Returns `Error::NotFound` if the key holds no value.
    async fn get(&self, key: &str) -> Result<VersionedValue>;

    /// Writes with optional precondition.
    ///
    /// Returns `WriteResult::PreconditionFailed` if the precondition is not
    /// met. Never returns an error for precondition failure - that is a
    /// normal result.
    async fn put(&self, key: &str, data: Bytes, precondition: WritePrecondition)
    -> Result<WriteResult>;
}

/// In-memory ledger for testing and local development.
///
/// Thread-safe via `RwLock`. Not suitable for production. Uses numeric
/// versions internally (stored as strings) to simulate transaction-level
/// conflict detection.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

#[derive(Debug, Clone)]
struct StoredEntry {
    data: Bytes,
    /// Numeric version stored as i64 internally, exposed as String via API.
    version: i64,
}

impl MemoryLedger {
    /// Creates a new empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get(&self, key: &str) -> Result<VersionedValue> {
        let entries = self.entries.read().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        entries
            .get(key)
            .map(|e| VersionedValue {
                data: e.data.clone(),
                version: e.version.to_string(),
            })
            .ok_or_else(|| Error::NotFound(format!("no value at key: {key}")))
    }

    async fn put(
        &self,
        key: &str,
        data: Bytes,
        precondition: WritePrecondition,
    ) -> Result<WriteResult> {
        let mut entries = self.entries.write().map_err(|_| Error::Internal {
            message: "lock poisoned".into(),
        })?;

        let current = entries.get(key);

        match precondition {
            WritePrecondition::DoesNotExist => {
                if let Some(entry) = current {
                    return Ok(WriteResult::PreconditionFailed {
                        current_version: entry.version.to_string(),
                    });
                }
            }
            WritePrecondition::MatchesVersion(expected) => {
                let expected_num: i64 = expected.parse().unwrap_or(-1);
                match current {
                    Some(entry) if entry.version != expected_num => {
                        return Ok(WriteResult::PreconditionFailed {
                            current_version: entry.version.to_string(),
                        });
                    }
                    None => {
                        return Ok(WriteResult::PreconditionFailed {
                            current_version: "0".to_string(),
                        });
                    }
                    _ => {}
                }
            }
            WritePrecondition::None => {}
        }

        let new_version = current.map_or(1, |e| e.version + 1);
        entries.insert(
            key.to_string(),
            StoredEntry {
                data,
                version: new_version,
            },
        );
        drop(entries);

        Ok(WriteResult::Success {
            version: new_version.to_string(),
        })
    }
}
