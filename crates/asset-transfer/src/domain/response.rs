//! # Response Envelope
//!
//! Uniform result returned to the host. Success carries an optional payload,
//! error carries the message surfaced to the submitter. There are no status
//! codes beyond the variant.

use crate::errors::ChaincodeError;
use serde::{Deserialize, Serialize};

/// Payload returned by a successful operation.
pub type Payload = Option<Vec<u8>>;

/// Result envelope handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    /// The host may commit the transaction's writes.
    Success {
        /// Optional return bytes.
        payload: Payload,
    },
    /// The host must not commit.
    Error {
        /// Human-readable failure message.
        message: String,
    },
}

impl Response {
    /// Success carrying `payload`.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self::Success {
            payload: Some(payload),
        }
    }

    /// Success without payload.
    #[must_use]
    pub fn success_empty() -> Self {
        Self::Success { payload: None }
    }

    /// Error with `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Encodes an operation outcome.
    #[must_use]
    pub fn from_outcome(outcome: Result<Payload, ChaincodeError>) -> Self {
        match outcome {
            Ok(payload) => Self::Success { payload },
            Err(err) => Self::error(err.to_string()),
        }
    }

    /// True for the success variant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success { payload } => payload.as_deref(),
            Self::Error { .. } => None,
        }
    }

    /// Error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message),
        }
    }
}

impl From<Result<Payload, ChaincodeError>> for Response {
    fn from(outcome: Result<Payload, ChaincodeError>) -> Self {
        Self::from_outcome(outcome)
    }
}
