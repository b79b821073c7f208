//! # Query Handler
//!
//! Read-only lookup returning the stored bytes unchanged.

use crate::domain::{AccountKey, Payload};
use crate::errors::{ChaincodeError, MessageFormat};
use crate::handlers::{expect_arity, key_at, Operation};
use crate::ledger::Ledger;
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

/// Returns one account's stored value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Query;

#[async_trait]
impl Operation for Query {
    const NAME: &'static str = "query";

    type Args = AccountKey;

    fn validate(&self, params: &[String]) -> Result<AccountKey, ChaincodeError> {
        expect_arity(params, 1, "name of the person to query")?;
        key_at(params, 0)
    }

    async fn execute(
        &self,
        key: AccountKey,
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError> {
        let Some(value) = ledger.get_state(&key).await? else {
            return Err(ChaincodeError::MissingAccount {
                key: key.to_string(),
                format: MessageFormat::Json,
            });
        };

        let summary = json!({
            "name": key.as_str(),
            "amount": String::from_utf8_lossy(&value),
        });
        info!(response = %summary, "Query Response");
        Ok(Some(value))
    }
}
