//! # Transfer Engine
//!
//! Debits one account and credits another. The two legs carry independent
//! amounts, and a debit may drive the source balance negative.
//!
//! Failure order:
//!
//! 1. arity
//! 2. empty account identifier
//! 3. non-integer amount, or zero unless `allow_zero_amount`
//! 4. source account absent
//! 5. destination account absent
//! 6. stored balance not an integer, or arithmetic overflow
//! 7. ledger write failure
//!
//! Steps 1-6 issue no write. The source write is issued before the
//! destination write.

use crate::domain::{compute_transfer, AccountKey, Amount, Balance, Payload};
use crate::errors::{ChaincodeError, MessageFormat};
use crate::handlers::{expect_arity, key_at, Operation};
use crate::ledger::Ledger;
use async_trait::async_trait;
use tracing::info;

const INVALID_AMOUNT: &str = "Transfer values must not be empty";

/// `[fromAccount, fromAmount, toAccount, toAmount]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferArgs {
    /// Debited account.
    pub from: AccountKey,
    /// Amount debited.
    pub from_amount: Amount,
    /// Credited account.
    pub to: AccountKey,
    /// Amount credited.
    pub to_amount: Amount,
}

/// The `invoke` function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transfer {
    allow_zero_amount: bool,
}

impl Transfer {
    /// Creates the engine with the given zero-amount policy.
    #[must_use]
    pub fn new(allow_zero_amount: bool) -> Self {
        Self { allow_zero_amount }
    }

    fn amount(&self, raw: &str) -> Result<Amount, ChaincodeError> {
        Amount::parse(raw)
            .filter(|amount| self.allow_zero_amount || !amount.is_zero())
            .ok_or_else(|| ChaincodeError::ArgumentType {
                reason: INVALID_AMOUNT,
                value: raw.to_owned(),
            })
    }
}

async fn read_balance(ledger: &Ledger<'_>, key: &AccountKey) -> Result<Balance, ChaincodeError> {
    let bytes = ledger
        .get_state(key)
        .await?
        .ok_or_else(|| ChaincodeError::MissingAccount {
            key: key.to_string(),
            format: MessageFormat::Plain,
        })?;
    Balance::decode(key, &bytes)
}

#[async_trait]
impl Operation for Transfer {
    const NAME: &'static str = "invoke";

    type Args = TransferArgs;

    fn validate(&self, params: &[String]) -> Result<TransferArgs, ChaincodeError> {
        expect_arity(params, 4, "4")?;
        let from = key_at(params, 0)?;
        let to = key_at(params, 2)?;
        let from_amount = self.amount(&params[1])?;
        let to_amount = self.amount(&params[3])?;
        Ok(TransferArgs {
            from,
            from_amount,
            to,
            to_amount,
        })
    }

    async fn execute(
        &self,
        args: TransferArgs,
        ledger: &mut Ledger<'_>,
    ) -> Result<Payload, ChaincodeError> {
        info!(
            "Debiting {} from {} and crediting {} to {}",
            args.from_amount, args.from, args.to_amount, args.to
        );

        let from_balance = read_balance(ledger, &args.from).await?;
        let to_balance = read_balance(ledger, &args.to).await?;

        let balances = compute_transfer(
            &args.from,
            from_balance,
            args.from_amount,
            &args.to,
            to_balance,
            args.to_amount,
        )?;
        info!(from_val = %balances.from, to_val = %balances.to, "Computed balances");

        ledger.put_state(&args.from, balances.from.encode()).await?;
        ledger.put_state(&args.to, balances.to.encode()).await?;
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================
