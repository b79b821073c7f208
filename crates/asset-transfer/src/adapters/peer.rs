//! # Peer Simulator
//!
//! Endorsement-style host for tests. Each transaction runs against a private
//! write set layered over the world state. The write set is committed in one
//! step when the chaincode answers success and discarded otherwise, which is
//! the atomicity a real peer gives a failed transaction.

use crate::adapters::world_state::InMemoryWorldState;
use crate::domain::{InvocationRequest, Response};
use crate::errors::LedgerError;
use crate::ports::inbound::ChaincodeApi;
use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of one simulated transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutcome {
    /// Host transaction id.
    pub tx_id: String,
    /// Chaincode response.
    pub response: Response,
    /// Whether the write set reached the world state.
    pub committed: bool,
    /// Distinct keys in the write set.
    pub writes: usize,
}

#[derive(Clone, Copy, Debug)]
enum EntryPoint {
    Init,
    Invoke,
}

/// Stub recording writes in a transaction-local write set.
struct SimulationStub<'a> {
    state: &'a InMemoryWorldState,
    tx_id: String,
    request: InvocationRequest,
    write_set: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl<'a> SimulationStub<'a> {
    fn new(state: &'a InMemoryWorldState, tx_id: String, request: InvocationRequest) -> Self {
        Self {
            state,
            tx_id,
            request,
            write_set: Mutex::new(BTreeMap::new()),
        }
    }

    fn into_write_set(self) -> BTreeMap<String, Option<Vec<u8>>> {
        self.write_set.into_inner()
    }
}

#[async_trait]
impl<'a> ChaincodeStub for SimulationStub<'a> {
    fn get_function_and_parameters(&self) -> InvocationRequest {
        self.request.clone()
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(pending) = self.write_set.lock().get(key) {
            return Ok(pending.clone());
        }
        Ok(self.state.get(key))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.state.check_fault("put_state", key)?;
        self.write_set.lock().insert(key.to_string(), Some(value));
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), LedgerError> {
        self.state.check_fault("delete_state", key)?;
        self.write_set.lock().insert(key.to_string(), None);
        Ok(())
    }
}

/// Drives a chaincode the way a peer does: simulate, then commit or discard.
pub struct PeerSimulator<C: ChaincodeApi> {
    chaincode: C,
    state: Arc<InMemoryWorldState>,
    sequence: AtomicU64,
}

impl<C: ChaincodeApi> PeerSimulator<C> {
    /// Creates a simulator over `state`.
    pub fn new(chaincode: C, state: Arc<InMemoryWorldState>) -> Self {
        Self {
            chaincode,
            state,
            sequence: AtomicU64::new(0),
        }
    }

    /// The committed world state.
    #[must_use]
    pub fn state(&self) -> &Arc<InMemoryWorldState> {
        &self.state
    }

    /// Runs the `init` entry point.
    pub async fn instantiate(&self, request: InvocationRequest) -> TransactionOutcome {
        self.execute(EntryPoint::Init, request, &CancellationToken::new())
            .await
    }

    /// Runs the `invoke` entry point.
    pub async fn submit(&self, request: InvocationRequest) -> TransactionOutcome {
        self.execute(EntryPoint::Invoke, request, &CancellationToken::new())
            .await
    }

    /// Runs the `invoke` entry point under a caller-owned token.
    pub async fn submit_with_cancel(
        &self,
        request: InvocationRequest,
        cancel: &CancellationToken,
    ) -> TransactionOutcome {
        self.execute(EntryPoint::Invoke, request, cancel).await
    }

    async fn execute(
        &self,
        entry: EntryPoint,
        request: InvocationRequest,
        cancel: &CancellationToken,
    ) -> TransactionOutcome {
        let tx_id = format!("tx-{}", self.sequence.fetch_add(1, Ordering::Relaxed));
        let stub = SimulationStub::new(&self.state, tx_id.clone(), request);

        let response = match entry {
            EntryPoint::Init => self.chaincode.init(&stub, cancel).await,
            EntryPoint::Invoke => self.chaincode.invoke(&stub, cancel).await,
        };

        let write_set = stub.into_write_set();
        let writes = write_set.len();
        let committed = response.is_success() && !cancel.is_cancelled();
        if committed {
            self.state.commit(write_set);
            info!(tx_id = %tx_id, writes, "Transaction committed");
        } else {
            debug!(tx_id = %tx_id, writes, "Transaction write set discarded");
        }

        TransactionOutcome {
            tx_id,
            response,
            committed,
            writes,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
