//! # Driven Port (SPI - Outbound)
//!
//! State operations supplied by the host for one transaction. Adapters in
//! `adapters/` implement this for tests; a real peer binding implements it
//! over its transport.

use crate::domain::InvocationRequest;
use crate::errors::LedgerError;
use async_trait::async_trait;

/// Per-transaction view of the host.
///
/// Keys reaching this trait are never empty: the ledger accessor only takes
/// validated [`AccountKey`](crate::domain::AccountKey)s.
#[async_trait]
pub trait ChaincodeStub: Send + Sync {
    /// Function name and ordered parameters of the current transaction.
    fn get_function_and_parameters(&self) -> InvocationRequest;

    /// Host transaction id, used only for log correlation.
    fn tx_id(&self) -> &str;

    /// Reads `key`.
    ///
    /// # Returns
    ///
    /// * `Some(bytes)` - stored value
    /// * `None` - key absent
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Writes `value` under `key`.
    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete_state(&self, key: &str) -> Result<(), LedgerError>;
}
