//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: `ChaincodeApi`, called by the host peer
//! - **Driven Port (Outbound)**: `ChaincodeStub`, the host's state operations

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
