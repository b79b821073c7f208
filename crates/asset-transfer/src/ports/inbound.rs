//! # Driving Port (API - Inbound)
//!
//! Entry points the host calls. The request is read from the stub, so one
//! chaincode value serves every transaction.

use crate::domain::Response;
use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Chaincode entry points.
///
/// Both methods always produce a [`Response`]; failures are encoded in its
/// error variant. `cancel` is threaded through every ledger call; once it
/// fires no further ledger operation is issued.
#[async_trait]
pub trait ChaincodeApi: Send + Sync {
    /// Called once when the chaincode is instantiated or upgraded.
    async fn init(&self, stub: &dyn ChaincodeStub, cancel: &CancellationToken) -> Response;

    /// Called once per submitted transaction.
    async fn invoke(&self, stub: &dyn ChaincodeStub, cancel: &CancellationToken) -> Response;
}
