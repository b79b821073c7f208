//! # Ledger Accessor
//!
//! The only path from handlers to the host. Every call:
//!
//! 1. takes a validated [`AccountKey`], so empty keys never reach the host
//! 2. refuses to start once the invocation's [`CancellationToken`] fired
//! 3. abandons a pending host call when the token fires mid-flight
//!
//! In [`WriteMode::Buffered`] puts and deletes are staged and only sent to the
//! host by [`Ledger::flush`], which the service calls after the handler
//! returned successfully. A failed handler therefore issues zero writes.
//! Staged writes are visible to later reads of the same invocation.

use crate::config::WriteMode;
use crate::domain::AccountKey;
use crate::errors::{ChaincodeError, LedgerError};
use crate::ports::outbound::ChaincodeStub;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A write waiting for [`Ledger::flush`].
#[derive(Clone, Debug, PartialEq, Eq)]
enum StagedWrite {
    Put { key: AccountKey, value: Vec<u8> },
    Delete { key: AccountKey },
}

impl StagedWrite {
    fn key(&self) -> &AccountKey {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// Cancellation-aware accessor over one transaction's stub.
pub struct Ledger<'a> {
    stub: &'a dyn ChaincodeStub,
    cancel: &'a CancellationToken,
    mode: WriteMode,
    staged: Vec<StagedWrite>,
}

impl<'a> Ledger<'a> {
    /// Creates an accessor for one invocation.
    pub fn new(
        stub: &'a dyn ChaincodeStub,
        cancel: &'a CancellationToken,
        mode: WriteMode,
    ) -> Self {
        Self {
            stub,
            cancel,
            mode,
            staged: Vec::new(),
        }
    }

    /// Number of staged writes not yet sent to the host.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Reads `key`, seeing this invocation's staged writes first.
    ///
    /// # Errors
    ///
    /// [`ChaincodeError::Ledger`] if the host fails or the invocation is cancelled.
    pub async fn get_state(&self, key: &AccountKey) -> Result<Option<Vec<u8>>, ChaincodeError> {
        if let Some(staged) = self.staged_value(key) {
            debug!(key = %key, "get_state served from staged writes");
            return Ok(staged);
        }
        self.guarded("get_state", key, self.stub.get_state(key.as_str()))
            .await
    }

    /// Writes `value` under `key`, or stages it in buffered mode.
    ///
    /// # Errors
    ///
    /// [`ChaincodeError::Ledger`] if the host fails or the invocation is cancelled.
    pub async fn put_state(
        &mut self,
        key: &AccountKey,
        value: Vec<u8>,
    ) -> Result<(), ChaincodeError> {
        match self.mode {
            WriteMode::Buffered => {
                self.ensure_live("put_state", key)?;
                self.staged.push(StagedWrite::Put {
                    key: key.clone(),
                    value,
                });
                Ok(())
            }
            WriteMode::Direct => {
                self.guarded("put_state", key, self.stub.put_state(key.as_str(), value))
                    .await
            }
        }
    }

    /// Deletes `key`, or stages the delete in buffered mode.
    ///
    /// # Errors
    ///
    /// [`ChaincodeError::Ledger`] if the host fails or the invocation is cancelled.
    pub async fn delete_state(&mut self, key: &AccountKey) -> Result<(), ChaincodeError> {
        match self.mode {
            WriteMode::Buffered => {
                self.ensure_live("delete_state", key)?;
                self.staged.push(StagedWrite::Delete { key: key.clone() });
                Ok(())
            }
            WriteMode::Direct => {
                self.guarded("delete_state", key, self.stub.delete_state(key.as_str()))
                    .await
            }
        }
    }

    /// Sends staged writes to the host in issue order, one at a time.
    ///
    /// Stops at the first failure; writes already acknowledged stay with the
    /// host, the rest are dropped. Returns the number of writes sent.
    ///
    /// # Errors
    ///
    /// [`ChaincodeError::Ledger`] from the first failing write.
    pub async fn flush(&mut self) -> Result<usize, ChaincodeError> {
        let staged = std::mem::take(&mut self.staged);
        let total = staged.len();
        for (index, write) in staged.into_iter().enumerate() {
            let result = match write {
                StagedWrite::Put { key, value } => {
                    self.guarded("put_state", &key, self.stub.put_state(key.as_str(), value))
                        .await
                }
                StagedWrite::Delete { key } => {
                    self.guarded("delete_state", &key, self.stub.delete_state(key.as_str()))
                        .await
                }
            };
            if let Err(err) = result {
                warn!(
                    flushed = index,
                    total,
                    error = %err,
                    "Flush of staged writes stopped"
                );
                return Err(err);
            }
        }
        if total > 0 {
            debug!(count = total, "Flushed staged writes");
        }
        Ok(total)
    }

    fn staged_value(&self, key: &AccountKey) -> Option<Option<Vec<u8>>> {
        self.staged
            .iter()
            .rev()
            .find(|write| write.key() == key)
            .map(|write| match write {
                StagedWrite::Put { value, .. } => Some(value.clone()),
                StagedWrite::Delete { .. } => None,
            })
    }

    fn ensure_live(&self, operation: &'static str, key: &AccountKey) -> Result<(), ChaincodeError> {
        if self.cancel.is_cancelled() {
            warn!(operation, key = %key, "Ledger call refused after cancellation");
            return Err(LedgerError::Cancelled {
                operation,
                key: key.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn guarded<T>(
        &self,
        operation: &'static str,
        key: &AccountKey,
        call: impl Future<Output = Result<T, LedgerError>> + Send,
    ) -> Result<T, ChaincodeError> {
        self.ensure_live(operation, key)?;
        debug!(operation, key = %key, "Ledger call");
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                warn!(operation, key = %key, "Ledger call abandoned on cancellation");
                Err(LedgerError::Cancelled {
                    operation,
                    key: key.to_string(),
                }
                .into())
            }
            result = call => result.map_err(ChaincodeError::from),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
