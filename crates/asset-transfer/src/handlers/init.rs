//! # Initializer
//!
//! Seeds two accounts with opening balances. The submitted amount text is
//! stored verbatim once it has been checked to be an integer.

use crate::domain::{AccountKey, Amount, Payload};
use crate::errors::ChaincodeError;
use crate::handlers::{expect_arity, key_at, Operation};
use crate::ledger::Ledger;
use async_trait::async_trait;
use tracing::info;

/// `[accountA, amountA, accountB, amountB]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitArgs {
    /// First account and its opening value.
    pub first: (AccountKey, String),
    /// Second account and its opening value.
    pub second: (AccountKey, String),
}

/// Bootstrap operation called from the `init` entry point, and through
/// `invoke` under the name `Init`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Init;

fn opening_value(raw: &str) -> Result<String, ChaincodeError> {
    Amount::parse(raw)
        .map(|_| raw.to_owned())
        .ok_or_else(|| ChaincodeError::ArgumentType {
            reason: "Expecting number value for asset holding",
            value: raw.to_owned(),
        })
}

#[async_trait]
impl Operation for Init {
    const NAME: &'static str = "Init";

    type Args = InitArgs;

    fn validate(&self, params: &[String]) -> Result<InitArgs, ChaincodeError> {
        expect_arity(params, 4, "4")?;
        let first_key = key_at(params, 0)?;
        let second_key = key_at(params, 2)?;
        let first_value = opening_value(&params[1])?;
        let second_value = opening_value(&params[3])?;
        Ok(InitArgs {
            first: (first_key, first_value),
            second: (second_key, second_value),
        })
    }

    async fn execute(
        &self,
        args: InitArgs,
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError> {
        let InitArgs {
            first: (first_key, first_value),
            second: (second_key, second_value),
        } = args;

        info!(
            account_a = %first_key,
            value_a = %first_value,
            account_b = %second_key,
            value_b = %second_value,
            "Seeding accounts"
        );
        ledger.put_state(&first_key, first_value.into_bytes()).await?;
        ledger.put_state(&second_key, second_value.into_bytes()).await?;
        Ok(None)
    }
}
