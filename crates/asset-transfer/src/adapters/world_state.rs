//! # In-Memory World State
//!
//! Ordered key-value store standing in for the peer's state database, plus a
//! [`MockStub`] that applies writes to it immediately. Write counters and
//! one-shot fault injection let tests observe exactly what reached the host.

use crate::domain::InvocationRequest;
use crate::errors::LedgerError;
use crate::ports::outbound::ChaincodeStub;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, Vec<u8>>,
    /// Key -> reason; the next put or delete on the key fails once.
    faults: BTreeMap<String, String>,
    puts: usize,
    deletes: usize,
}

/// In-memory world state for testing.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    inner: RwLock<Inner>,
}

impl InMemoryWorldState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state seeded with text values. Seeding is not counted as writes.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        let state = Self::new();
        for (key, value) in entries {
            state.seed(key, value.as_ref().to_vec());
        }
        state
    }

    /// Sets a value without counting it as a write.
    pub fn seed(&self, key: impl Into<String>, value: Vec<u8>) {
        self.inner.write().entries.insert(key.into(), value);
    }

    /// Reads a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.read().entries.get(key).cloned()
    }

    /// Reads a value as text.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// True if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// True if no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Copy of all entries in key order.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.inner.read().entries.clone()
    }

    /// Puts and deletes applied so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        let inner = self.inner.read();
        inner.puts + inner.deletes
    }

    /// Makes the next put or delete on `key` fail with `reason`.
    pub fn fail_next_write(&self, key: impl Into<String>, reason: impl Into<String>) {
        self.inner.write().faults.insert(key.into(), reason.into());
    }

    /// Consumes an injected fault for `key`, if any.
    pub(crate) fn check_fault(
        &self,
        operation: &'static str,
        key: &str,
    ) -> Result<(), LedgerError> {
        match self.inner.write().faults.remove(key) {
            Some(reason) => Err(LedgerError::Rejected {
                operation,
                key: key.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Stores `value`, honouring injected faults.
    pub(crate) fn apply_put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_fault("put_state", key)?;
        let mut inner = self.inner.write();
        inner.entries.insert(key.to_string(), value);
        inner.puts += 1;
        Ok(())
    }

    /// Removes `key`, honouring injected faults. Absent keys are fine.
    pub(crate) fn apply_delete(&self, key: &str) -> Result<(), LedgerError> {
        self.check_fault("delete_state", key)?;
        let mut inner = self.inner.write();
        inner.entries.remove(key);
        inner.deletes += 1;
        Ok(())
    }

    /// Applies a write set under a single lock. `None` deletes the key.
    pub(crate) fn commit(&self, write_set: BTreeMap<String, Option<Vec<u8>>>) {
        let mut inner = self.inner.write();
        for (key, value) in write_set {
            match value {
                Some(value) => {
                    inner.entries.insert(key, value);
                    inner.puts += 1;
                }
                None => {
                    inner.entries.remove(&key);
                    inner.deletes += 1;
                }
            }
        }
    }
}

// =============================================================================
// MOCK STUB
// =============================================================================

/// Stub that applies every write straight to an [`InMemoryWorldState`].
///
/// Nothing is rolled back when the response is an error; use
/// [`PeerSimulator`](crate::adapters::PeerSimulator) for commit semantics.
#[derive(Debug, Clone)]
pub struct MockStub {
    state: Arc<InMemoryWorldState>,
    tx_id: String,
    request: InvocationRequest,
}

impl MockStub {
    /// Creates a stub for one transaction.
    pub fn new(
        state: Arc<InMemoryWorldState>,
        tx_id: impl Into<String>,
        request: InvocationRequest,
    ) -> Self {
        Self {
            state,
            tx_id: tx_id.into(),
            request,
        }
    }
}

#[async_trait]
impl ChaincodeStub for MockStub {
    fn get_function_and_parameters(&self) -> InvocationRequest {
        self.request.clone()
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.state.get(key))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.state.apply_put(key, value)
    }

    async fn delete_state(&self, key: &str) -> Result<(), LedgerError> {
        self.state.apply_delete(key)
    }
}

// =============================================================================
// TESTS
// =============================================================================
