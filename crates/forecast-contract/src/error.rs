//! Error types for contract operations.

use thiserror::Error;

use crate::identity::IdentityError;
use crate::response::{STATUS_FAILURE, STATUS_REJECTED};

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Errors that can occur while handling a contract invocation.
///
/// Every variant is surfaced to the caller as a failed response carrying a
/// human-readable message; none is treated as a fatal process-level failure.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The invocation carried the wrong number of positional arguments.
    #[error("incorrect number of arguments: expected {expected}, got {actual}")]
    ArgumentCount {
        /// How many arguments the operation requires.
        expected: usize,
        /// How many arguments were supplied.
        actual: usize,
    },

    /// The caller's identity credential could not be resolved.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// No record exists at the derived key.
    #[error("no forecast found for key {key}")]
    NotFound {
        /// The ledger key that was looked up.
        key: String,
    },

    /// Encoding a record for storage failed.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// A stored value was not a valid record encoding.
    #[error("deserialization error: {message}")]
    Deserialization {
        /// Description of the deserialization failure.
        message: String,
    },

    /// The underlying ledger read or write failed, including version
    /// conflicts detected on commit.
    #[error("storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },

    /// The invocation named a function this contract does not implement.
    #[error("unknown function name: {name}")]
    UnknownFunction {
        /// The unrecognized function name.
        name: String,
    },
}

impl ContractError {
    /// Returns the response status this error maps to.
    ///
    /// Unknown functions and arity failures are rejected in the
    /// permission/validation family; everything else is an execution
    /// failure.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::ArgumentCount { .. } | Self::UnknownFunction { .. } => STATUS_REJECTED,
            Self::Identity(_)
            | Self::NotFound { .. }
            | Self::Serialization { .. }
            | Self::Deserialization { .. }
            | Self::Storage { .. } => STATUS_FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_and_unknown_function_are_rejections() {
        let err = ContractError::ArgumentCount {
            expected: 13,
            actual: 2,
        };
        assert_eq!(err.status(), STATUS_REJECTED);

        let err = ContractError::UnknownFunction {
            name: "deleteForecast".to_string(),
        };
        assert_eq!(err.status(), STATUS_REJECTED);
    }

    #[test]
    fn execution_failures_map_to_failure_status() {
        let err = ContractError::NotFound {
            key: "111-200".to_string(),
        };
        assert_eq!(err.status(), STATUS_FAILURE);

        let err = ContractError::Storage {
            message: "write failed".to_string(),
        };
        assert_eq!(err.status(), STATUS_FAILURE);
    }
}
