//! # forecast-contract
//!
//! Identity-gated create/acknowledge/read operations for supply-chain
//! order forecasts on a versioned key-value ledger.
//!
//! The producer organization creates forecast records, the consumer
//! organization acknowledges them with a status and comment, any
//! authenticated caller reads a record by key, and an unauthenticated
//! liveness probe is always answered.
//!
//! Components:
//!
//! - [`identity`]: resolves `(common_name, organization)` from the
//!   transport-supplied certificate blob
//! - [`forecast`]: the persisted record and its ledger encoding
//! - [`key`]: deterministic ledger key derivation
//! - [`request`]: typed requests parsed once from positional arguments
//! - [`config`]: the organization authorization policy
//! - [`service`]: the three operations plus function-name dispatch
//!
//! The ledger substrate and the invocation transport are external
//! collaborators; see `forecast-core` for the storage seam.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use forecast_contract::prelude::*;
//! use forecast_core::MemoryLedger;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ForecastService::new(
//!     Arc::new(MemoryLedger::new()),
//!     Arc::new(StaticIdentity::new("buyer@walmart", "walmart")),
//!     ContractConfig::default(),
//! )
//! .expect("valid config");
//!
//! let response = service
//!     .invoke("query", &["health".to_string()], b"")
//!     .await;
//! assert!(response.is_success());
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod forecast;
pub mod identity;
pub mod key;
pub mod request;
pub mod response;
pub mod service;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use forecast_contract::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, ContractConfig};
    pub use crate::error::{ContractError, Result};
    pub use crate::forecast::Forecast;
    pub use crate::identity::{
        CallerIdentity, CertificateIdentityResolver, IdentityError, IdentityResolver,
        StaticIdentity,
    };
    pub use crate::key::ForecastKey;
    pub use crate::request::{
        AcknowledgeForecastRequest, CreateForecastRequest, QueryForecastRequest,
    };
    pub use crate::response::{
        ContractResponse, STATUS_FAILURE, STATUS_REJECTED, STATUS_SUCCESS,
    };
    pub use crate::service::{
        AckOutcome, CreateOutcome, FN_ACK_FORECAST, FN_ADD_FORECAST, FN_QUERY, ForecastService,
        HEALTH_PROBE,
    };
}

pub use config::{ConfigError, ContractConfig};
pub use error::{ContractError, Result};
pub use forecast::Forecast;
pub use identity::{
    CallerIdentity, CertificateIdentityResolver, IdentityError, IdentityResolver, StaticIdentity,
};
pub use key::ForecastKey;
pub use request::{AcknowledgeForecastRequest, CreateForecastRequest, QueryForecastRequest};
pub use response::{ContractResponse, STATUS_FAILURE, STATUS_REJECTED, STATUS_SUCCESS};
pub use service::{
    AckOutcome, CreateOutcome, FN_ACK_FORECAST, FN_ADD_FORECAST, FN_QUERY, ForecastService,
    HEALTH_PROBE,
};
