//! The forecast service: dispatch, authorization, and the three operations.
//!
//! An invocation arrives as a function name, a flat list of string
//! arguments, and the caller's credential blob. The service resolves the
//! caller's identity, applies the organization policy for the requested
//! operation, derives the ledger key, and performs the read or write as one
//! transactional unit against the [`LedgerStore`].
//!
//! The service itself is stateless; two concurrent acknowledgments of the
//! same key race, and the ledger's version-conflict detection is the only
//! safeguard against a lost update.

use std::sync::Arc;

use bytes::Bytes;
use tracing::Instrument;

use forecast_core::Error as LedgerError;
use forecast_core::ledger::{LedgerStore, WritePrecondition, WriteResult};
use forecast_core::observability::invoke_span;

use crate::config::{ConfigError, ContractConfig};
use crate::error::{ContractError, Result};
use crate::forecast::Forecast;
use crate::identity::IdentityResolver;
use crate::key::ForecastKey;
use crate::request::{AcknowledgeForecastRequest, CreateForecastRequest, QueryForecastRequest};
use crate::response::ContractResponse;

/// Wire name of the create operation.
pub const FN_ADD_FORECAST: &str = "addForecast";
/// Wire name of the acknowledge operation.
pub const FN_ACK_FORECAST: &str = "ackForecast";
/// Wire name of the read operation.
pub const FN_QUERY: &str = "query";

/// First query argument selecting the unauthenticated liveness probe.
pub const HEALTH_PROBE: &str = "health";

/// Outcome of a create operation.
///
/// A call from outside the producer organization performs no write but
/// still reports success on the wire; the distinction is explicit here so
/// that mapping is a deliberate choice at the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was written.
    Created,
    /// Caller is not the producer organization; nothing was written.
    SkippedUnauthorized,
}

/// Outcome of an acknowledge operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// The record was updated with status and comments.
    Acknowledged,
    /// Caller is not the consumer organization; nothing was written.
    SkippedUnauthorized,
}

/// The forecast contract service.
///
/// Holds the ledger seam, the identity resolver, and the organization
/// policy; all durable state lives in the ledger.
pub struct ForecastService {
    ledger: Arc<dyn LedgerStore>,
    identity: Arc<dyn IdentityResolver>,
    config: ContractConfig,
}

impl ForecastService {
    /// Creates a service over the given ledger and identity resolver.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the organization policy is invalid.
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        identity: Arc<dyn IdentityResolver>,
        config: ContractConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ledger,
            identity,
            config,
        })
    }

    /// Dispatches an invocation by wire function name.
    ///
    /// Unknown names are rejected with a permission/validation status;
    /// operation errors become failure responses. Never panics.
    pub async fn invoke(
        &self,
        function: &str,
        args: &[String],
        creator: &[u8],
    ) -> ContractResponse {
        let span = invoke_span(function);
        async {
            let result = match function {
                FN_ADD_FORECAST => self.add_forecast(args, creator).await.map(|_| Bytes::new()),
                FN_ACK_FORECAST => self.ack_forecast(args, creator).await.map(|_| Bytes::new()),
                FN_QUERY => self.query(args, creator).await,
                other => Err(ContractError::UnknownFunction {
                    name: other.to_string(),
                }),
            };

            match result {
                Ok(payload) => ContractResponse::success(payload),
                Err(err) => {
                    tracing::debug!(error = %err, "invocation failed");
                    ContractResponse::from(&err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Creates a forecast record at the derived key.
    ///
    /// Only the producer organization writes; any other resolved caller is
    /// skipped without error. An existing record at the key is overwritten
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error when identity resolution, argument arity, encoding,
    /// or the ledger write fails.
    pub async fn add_forecast(&self, args: &[String], creator: &[u8]) -> Result<CreateOutcome> {
        let caller = self.identity.resolve(creator)?;
        if caller.organization != self.config.producer_org {
            tracing::warn!(
                organization = %caller.organization,
                common_name = %caller.common_name,
                "addForecast from non-producer organization, skipping write"
            );
            return Ok(CreateOutcome::SkippedUnauthorized);
        }

        let request = CreateForecastRequest::from_args(args)?;
        let key = request.key();
        let encoded = request.into_forecast().encode()?;

        let write = self
            .ledger
            .put(key.as_ref(), encoded, WritePrecondition::None)
            .await
            .map_err(|err| ledger_error(&key, err))?;

        match write {
            WriteResult::Success { version } => {
                tracing::debug!(key = %key, version, "forecast created");
                Ok(CreateOutcome::Created)
            }
            WriteResult::PreconditionFailed { .. } => Err(ContractError::Storage {
                message: format!("unconditional write rejected at {key}"),
            }),
        }
    }

    /// Records an acknowledgment on an existing forecast.
    ///
    /// Only the consumer organization writes; any other resolved caller is
    /// skipped without error. The read version is carried into the write
    /// precondition so a concurrent acknowledgment is rejected by the
    /// ledger instead of lost.
    ///
    /// # Errors
    ///
    /// Returns an error when identity resolution, argument arity, the read
    /// (including a missing record), the codec, or the conditional write
    /// fails.
    pub async fn ack_forecast(&self, args: &[String], creator: &[u8]) -> Result<AckOutcome> {
        let caller = self.identity.resolve(creator)?;
        if caller.organization != self.config.consumer_org {
            tracing::warn!(
                organization = %caller.organization,
                common_name = %caller.common_name,
                "ackForecast from non-consumer organization, skipping write"
            );
            return Ok(AckOutcome::SkippedUnauthorized);
        }

        let request = AcknowledgeForecastRequest::from_args(args)?;
        let key = request.key();

        let existing = self
            .ledger
            .get(key.as_ref())
            .await
            .map_err(|err| ledger_error(&key, err))?;

        let mut forecast = Forecast::decode(&existing.data)?;
        forecast.status = request.status;
        forecast.comments = request.comments;
        let encoded = forecast.encode()?;

        let write = self
            .ledger
            .put(
                key.as_ref(),
                encoded,
                WritePrecondition::MatchesVersion(existing.version),
            )
            .await
            .map_err(|err| ledger_error(&key, err))?;

        match write {
            WriteResult::Success { version } => {
                tracing::debug!(key = %key, version, "forecast acknowledged");
                Ok(AckOutcome::Acknowledged)
            }
            WriteResult::PreconditionFailed { current_version } => Err(ContractError::Storage {
                message: format!(
                    "forecast at {key} was modified concurrently (current version {current_version})"
                ),
            }),
        }
    }

    /// Reads a stored forecast, or answers the liveness probe.
    ///
    /// `query(["health"])` succeeds with an empty payload and performs no
    /// identity check. Any other query requires a resolvable identity from
    /// any organization and returns the raw stored encoding unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error when identity resolution or argument arity fails,
    /// or no record exists at the key.
    pub async fn query(&self, args: &[String], creator: &[u8]) -> Result<Bytes> {
        if args.first().map(String::as_str) == Some(HEALTH_PROBE) {
            tracing::info!("health probe ok");
            return Ok(Bytes::new());
        }

        let caller = self.identity.resolve(creator)?;
        tracing::debug!(
            organization = %caller.organization,
            common_name = %caller.common_name,
            "query"
        );

        let request = QueryForecastRequest::from_args(args)?;
        let key = request.key();

        let value = self
            .ledger
            .get(key.as_ref())
            .await
            .map_err(|err| ledger_error(&key, err))?;

        Ok(value.data)
    }
}

fn ledger_error(key: &ForecastKey, err: LedgerError) -> ContractError {
    match err {
        LedgerError::NotFound(_) => ContractError::NotFound {
            key: key.to_string(),
        },
        other => ContractError::Storage {
            message: other.to_string(),
        },
    }
}
