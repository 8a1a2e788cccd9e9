//! Invocation response type and status codes.
//!
//! The invocation transport expects every call to resolve to a status, a
//! message, and an optional payload. Status values are part of the wire
//! contract: 200 for success, 403 for the permission/validation family
//! (unknown function, wrong arity), 500 for execution failures.

use bytes::Bytes;

use crate::error::ContractError;

/// Status of a successful invocation.
pub const STATUS_SUCCESS: u16 = 200;
/// Status of a rejected invocation (unknown function, wrong arity).
pub const STATUS_REJECTED: u16 = 403;
/// Status of a failed invocation (identity, storage, codec, not-found).
pub const STATUS_FAILURE: u16 = 500;

/// The result of a contract invocation, as handed back to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractResponse {
    /// Response status code.
    pub status: u16,
    /// Human-readable message; empty on success.
    pub message: String,
    /// Response payload; empty unless the operation returns data.
    pub payload: Bytes,
}

impl ContractResponse {
    /// Creates a success response with the given payload.
    #[must_use]
    pub fn success(payload: Bytes) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: String::new(),
            payload,
        }
    }

    /// Creates a failure response with the given status and message.
    #[must_use]
    pub fn failure(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: Bytes::new(),
        }
    }

    /// Returns true when the invocation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl From<&ContractError> for ContractResponse {
    fn from(err: &ContractError) -> Self {
        Self::failure(err.status(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_carries_payload() {
        let response = ContractResponse::success(Bytes::from("data"));
        assert!(response.is_success());
        assert!(response.message.is_empty());
        assert_eq!(response.payload, Bytes::from("data"));
    }

    #[test]
    fn error_maps_status_and_message() {
        let err = ContractError::UnknownFunction {
            name: "bogus".to_string(),
        };
        let response = ContractResponse::from(&err);
        assert_eq!(response.status, STATUS_REJECTED);
        assert!(response.message.contains("bogus"));
        assert!(response.payload.is_empty());
    }
}
