//! # Operation Handlers
//!
//! Each operation is split into a synchronous `validate` step, which turns
//! raw parameters into typed arguments without touching the ledger, and an
//! async `execute` step that talks to the [`Ledger`].
//!
//! | Operation | Module | Registered as |
//! |-----------|--------|---------------|
//! | [`Init`] | `init.rs` | `Init` (and the `init` entry point) |
//! | [`Transfer`] | `transfer.rs` | `invoke` |
//! | [`Query`] | `query.rs` | `query` |
//! | [`Delete`] | `delete.rs` | `delete` |

pub mod delete;
pub mod init;
pub mod query;
pub mod transfer;

pub use delete::Delete;
pub use init::Init;
pub use query::Query;
pub use transfer::Transfer;

use crate::domain::{AccountKey, Payload};
use crate::errors::ChaincodeError;
use crate::ledger::Ledger;
use async_trait::async_trait;

/// A typed chaincode operation.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Registry name.
    const NAME: &'static str;

    /// Arguments produced by [`Operation::validate`].
    type Args: Send;

    /// Checks arity and content of `params`. Never touches the ledger.
    ///
    /// # Errors
    ///
    /// Argument-count, argument-type and empty-key failures.
    fn validate(&self, params: &[String]) -> Result<Self::Args, ChaincodeError>;

    /// Runs the operation against the ledger.
    ///
    /// # Errors
    ///
    /// Missing accounts, unusable stored values and ledger failures.
    async fn execute(
        &self,
        args: Self::Args,
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError>;
}

/// Object-safe form of [`Operation`] stored in the registry.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// Validates, then executes.
    async fn handle(
        &self,
        params: &[String],
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError>;
}

#[async_trait]
impl<T: Operation> Handler for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    async fn handle(
        &self,
        params: &[String],
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError> {
        let args = self.validate(params)?;
        self.execute(args, ledger).await
    }
}

/// Fails unless exactly `expected` parameters were supplied.
pub(crate) fn expect_arity(
    params: &[String],
    expected: usize,
    expecting: &'static str,
) -> Result<(), ChaincodeError> {
    if params.len() == expected {
        Ok(())
    } else {
        Err(ChaincodeError::ArgumentCount {
            expecting,
            actual: params.len(),
        })
    }
}

/// Parses the account key at `index`. Callers check arity first.
pub(crate) fn key_at(params: &[String], index: usize) -> Result<AccountKey, ChaincodeError> {
    AccountKey::parse(params.get(index).map_or("", String::as_str))
}
