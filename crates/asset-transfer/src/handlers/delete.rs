//! # Delete Handler

use crate::domain::{AccountKey, Payload};
use crate::errors::ChaincodeError;
use crate::handlers::{expect_arity, key_at, Operation};
use crate::ledger::Ledger;
use async_trait::async_trait;
use tracing::info;

/// Removes one account entry. Deleting an absent key succeeds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Delete;

#[async_trait]
impl Operation for Delete {
    const NAME: &'static str = "delete";

    type Args = AccountKey;

    fn validate(&self, params: &[String]) -> Result<AccountKey, ChaincodeError> {
        expect_arity(params, 1, "1")?;
        key_at(params, 0)
    }

    async fn execute(
        &self,
        key: AccountKey,
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError> {
        info!(key = %key, "Deleting account");
        ledger.delete_state(&key).await?;
        Ok(None)
    }
}
