//! # Asset Transfer Chaincode
//!
//! Business-logic layer of a ledger-resident smart contract. The host peer
//! calls [`ChaincodeApi::init`](ports::inbound::ChaincodeApi::init) once at
//! instantiation and [`ChaincodeApi::invoke`](ports::inbound::ChaincodeApi::invoke)
//! once per submitted transaction. Every call is a deterministic function of
//! the current world state and the request.
//!
//! ## Functions
//!
//! | Name | Params | Effect |
//! |------|--------|--------|
//! | `init` (entry point) | `A, Aval, B, Bval` | seeds two accounts |
//! | `Init` | `A, Aval, B, Bval` | re-seeds two accounts through `invoke` |
//! | `invoke` | `from, fromAmount, to, toAmount` | debits `from`, credits `to` |
//! | `query` | `key` | returns the stored balance bytes |
//! | `delete` | `key` | removes the account entry |
//!
//! ## Layout
//!
//! | Layer | Location | Purpose |
//! |-------|----------|---------|
//! | Domain | `domain/` | keys, balances, requests, response envelope |
//! | Ports | `ports/` | `ChaincodeApi` (driving), `ChaincodeStub` (driven) |
//! | Ledger | `ledger.rs` | cancellation-aware accessor with write staging |
//! | Handlers | `handlers/` | init, transfer, query, delete |
//! | Service | `service.rs` | registry and dispatch |
//! | Adapters | `adapters/` | in-memory world state and peer simulator |
//!
//! ## Determinism
//!
//! Handlers never consult the clock, randomness or any I/O besides the
//! ledger accessor. Registries and in-memory stores are ordered maps.
//!
//! ## Usage Example
//!
//! ```ignore
//! use asset_transfer::prelude::*;
//!
//! let peer = PeerSimulator::new(
//!     AssetTransferChaincode::new(ChaincodeConfig::default()),
//!     Arc::new(InMemoryWorldState::new()),
//! );
//! peer.instantiate(InvocationRequest::new("init", ["a", "100", "b", "200"])).await;
//! let outcome = peer.submit(InvocationRequest::new("query", ["a"])).await;
//! assert_eq!(outcome.response.payload(), Some(&b"100"[..]));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{InMemoryWorldState, MockStub, PeerSimulator, TransactionOutcome};
    pub use crate::config::{ChaincodeConfig, UnknownFunctionPolicy, WriteMode};
    pub use crate::domain::{AccountKey, Amount, Balance, InvocationRequest, Payload, Response};
    pub use crate::errors::{ChaincodeError, ErrorKind, LedgerError};
    pub use crate::handlers::{Delete, Handler, Init, Operation, Query, Transfer};
    pub use crate::ledger::Ledger;
    pub use crate::ports::{ChaincodeApi, ChaincodeStub};
    pub use crate::service::{AssetTransferChaincode, FunctionRegistry};
    pub use tokio_util::sync::CancellationToken;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chaincode name reported in logs.
pub const CHAINCODE_NAME: &str = "asset-transfer";
