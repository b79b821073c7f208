//! # Adapters Layer
//!
//! In-memory host implementations of the driven port, used by tests and by
//! embedders that want to exercise the chaincode without a peer.

pub mod peer;
pub mod world_state;

pub use peer::*;
pub use world_state::*;
