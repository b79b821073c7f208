//! # Domain Services
//!
//! Pure balance arithmetic for a transfer.

use crate::domain::value_objects::{AccountKey, Amount, Balance};
use crate::errors::ChaincodeError;

/// Balances after a debit/credit pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferBalances {
    /// New balance of the debited account.
    pub from: Balance,
    /// New balance of the credited account.
    pub to: Balance,
}

/// Debits `from_amount` from `from` and credits `to_amount` to `to`.
///
/// The two amounts are independent and no overdraft check is applied.
///
/// # Errors
///
/// [`ChaincodeError::BalanceOverflow`] naming the account whose new balance
/// does not fit in an `i64`.
pub fn compute_transfer(
    from_key: &AccountKey,
    from: Balance,
    from_amount: Amount,
    to_key: &AccountKey,
    to: Balance,
    to_amount: Amount,
) -> Result<TransferBalances, ChaincodeError> {
    let from = from
        .checked_debit(from_amount)
        .ok_or_else(|| ChaincodeError::BalanceOverflow {
            key: from_key.to_string(),
        })?;
    let to = to
        .checked_credit(to_amount)
        .ok_or_else(|| ChaincodeError::BalanceOverflow {
            key: to_key.to_string(),
        })?;
    Ok(TransferBalances { from, to })
}
