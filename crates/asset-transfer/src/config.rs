//! # Chaincode Configuration
//!
//! Policies the host fixes when it instantiates the chaincode. The module
//! never reads files or environment variables; the host embeds this struct
//! in its own configuration.

use serde::{Deserialize, Serialize};

/// What the dispatcher does with a function name that is not registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFunctionPolicy {
    /// Return success with no payload.
    #[default]
    Lenient,
    /// Return `UnknownFunction` as an error response.
    Strict,
}

/// How the ledger accessor issues writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Stage writes and flush them in issue order once the operation succeeded.
    #[default]
    Buffered,
    /// Issue every write to the host immediately.
    Direct,
}

/// Chaincode configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaincodeConfig {
    /// Dispatcher behaviour for unregistered function names.
    pub unknown_function: UnknownFunctionPolicy,
    /// Accept a transfer leg of `0`.
    pub allow_zero_amount: bool,
    /// Write staging policy.
    pub write_mode: WriteMode,
}

impl Default for ChaincodeConfig {
    fn default() -> Self {
        Self {
            unknown_function: UnknownFunctionPolicy::Lenient,
            allow_zero_amount: false,
            write_mode: WriteMode::Buffered,
        }
    }
}

impl ChaincodeConfig {
    /// Strict dispatch, otherwise defaults.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            unknown_function: UnknownFunctionPolicy::Strict,
            ..Self::default()
        }
    }

    /// Strict dispatch with direct writes.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            unknown_function: UnknownFunctionPolicy::Strict,
            allow_zero_amount: false,
            write_mode: WriteMode::Direct,
        }
    }

    /// Sets the write staging policy.
    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Sets whether zero transfer amounts are accepted.
    #[must_use]
    pub fn with_zero_amounts(mut self, allow: bool) -> Self {
        self.allow_zero_amount = allow;
        self
    }
}
