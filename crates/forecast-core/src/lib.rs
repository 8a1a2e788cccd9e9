//! # forecast-core
//!
//! Core abstractions for the order-forecast ledger contract.
//!
//! This crate provides the foundational types shared by the contract layer:
//!
//! - **Ledger Store**: the versioned key-value interface the contract
//!   persists through, with conditional-write semantics
//! - **Error Types**: shared error definitions and result types
//! - **Observability**: structured logging initialization and span helpers
//!
//! The durable ledger itself (replication, ordering, peer gossip) is an
//! external runtime concern; this crate only defines the seam the contract
//! reads and writes through, plus an in-memory implementation for tests
//! and local development.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ledger;
pub mod observability;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use forecast_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::ledger::{
        LedgerStore, MemoryLedger, VersionedValue, WritePrecondition, WriteResult,
    };
}

pub use error::{Error, Result};
pub use ledger::{LedgerStore, MemoryLedger, VersionedValue, WritePrecondition, WriteResult};
pub use observability::{LogFormat, init_logging};
