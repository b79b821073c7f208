//! # Error Types
//!
//! All error types for chaincode execution. Display strings are surfaced
//! verbatim to the transaction submitter.

use serde_json::json;
use thiserror::Error;

// =============================================================================
// CHAINCODE ERRORS
// =============================================================================

/// Rendering of a missing-account message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageFormat {
    /// `Failed to get state of asset holder <key>`.
    Plain,
    /// `{"error":"Failed to get state for <key>"}`.
    Json,
}

/// Failures raised by an operation and turned into an error response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChaincodeError {
    /// Wrong parameter arity.
    #[error("Incorrect number of arguments. Expecting {expecting}")]
    ArgumentCount {
        /// What the operation expects, e.g. `4`.
        expecting: &'static str,
        /// Number of parameters received.
        actual: usize,
    },

    /// Amount that is not an integer (or a disallowed zero).
    #[error("{reason}")]
    ArgumentType {
        /// Message shown to the submitter.
        reason: &'static str,
        /// The offending parameter.
        value: String,
    },

    /// Blank account identifier.
    #[error("asset holding must not be empty")]
    EmptyKey,

    /// Referenced key is absent from the world state.
    #[error("{}", missing_account_message(.key, .format))]
    MissingAccount {
        /// The absent key.
        key: String,
        /// How the message is rendered.
        format: MessageFormat,
    },

    /// Function name not present in the registry (strict mode only).
    #[error("no method of name: {name} found")]
    UnknownFunction {
        /// Requested function name.
        name: String,
    },

    /// Stored bytes do not decode as a decimal integer.
    #[error("Invalid state of asset holder {key}: {value:?} is not an integer")]
    InvalidStoredBalance {
        /// Account key.
        key: String,
        /// Lossy text of the stored bytes.
        value: String,
    },

    /// Computing a new balance overflowed `i64`.
    #[error("Balance overflow for asset holder {key}")]
    BalanceOverflow {
        /// Account key.
        key: String,
    },

    /// The host ledger accessor failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

fn missing_account_message(key: &str, format: &MessageFormat) -> String {
    match format {
        MessageFormat::Plain => format!("Failed to get state of asset holder {key}"),
        MessageFormat::Json => {
            json!({ "error": format!("Failed to get state for {key}") }).to_string()
        }
    }
}

/// Coarse classification of a [`ChaincodeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong parameter arity.
    ArgumentCount,
    /// Non-numeric or zero amount.
    ArgumentType,
    /// Blank account identifier.
    EmptyKey,
    /// Key absent from the ledger.
    MissingAccount,
    /// Unregistered function name.
    UnknownFunction,
    /// Stored value unusable for arithmetic.
    InvalidState,
    /// Host accessor failure, including cancellation.
    LedgerAccess,
}

impl ChaincodeError {
    /// Returns the error's classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            Self::ArgumentType { .. } => ErrorKind::ArgumentType,
            Self::EmptyKey => ErrorKind::EmptyKey,
            Self::MissingAccount { .. } => ErrorKind::MissingAccount,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::InvalidStoredBalance { .. } | Self::BalanceOverflow { .. } => {
                ErrorKind::InvalidState
            }
            Self::Ledger(_) => ErrorKind::LedgerAccess,
        }
    }

    /// Returns true if the failure happened before any ledger access.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ArgumentCount
                | ErrorKind::ArgumentType
                | ErrorKind::EmptyKey
                | ErrorKind::UnknownFunction
        )
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the host's state operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The host store cannot be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The host refused an operation on a key.
    #[error("ledger rejected {operation} on {key}: {reason}")]
    Rejected {
        /// Accessor operation name.
        operation: &'static str,
        /// Target key.
        key: String,
        /// Host-supplied reason.
        reason: String,
    },

    /// The invocation was abandoned by the host.
    #[error("invocation cancelled during {operation} on {key}")]
    Cancelled {
        /// Accessor operation that observed the cancellation.
        operation: &'static str,
        /// Target key.
        key: String,
    },

    /// Other host error.
    #[error("ledger error: {0}")]
    Other(String),
}

// =============================================================================
// TESTS
// =============================================================================
