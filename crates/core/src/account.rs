use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Amount};
use crate::ContractError;

/// Balance ledger keyed by account. Absent accounts hold zero.
///
/// Mutations are checked before any entry is written, so a rejected call
/// never leaves a half-applied update behind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    entries: BTreeMap<AccountId, Amount>,
    total: Amount,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &str) -> Amount {
        self.entries.get(account).copied().unwrap_or(0)
    }

    /// Sum of every balance in the ledger.
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, Amount)> {
        self.entries.iter().map(|(account, amount)| (account, *amount))
    }

    pub fn credit(&mut self, account: &str, amount: Amount) -> Result<Amount, ContractError> {
        let total = self
            .total
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        self.entries.insert(account.to_string(), balance);
        self.total = total;
        Ok(balance)
    }

    /// Moves `amount` from `from` to `to`, failing with `shortfall` when the
    /// sender's balance does not cover it. The total is unchanged.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Amount,
        shortfall: ContractError,
    ) -> Result<(), ContractError> {
        let from_balance = self.balance_of(from).checked_sub(amount).ok_or(shortfall)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        self.entries.insert(from.to_string(), from_balance);
        self.entries.insert(to.to_string(), to_balance);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_account_is_zero() {
        let balances = Balances::new();
        assert_eq!(balances.balance_of("nobody"), 0);
        assert!(balances.is_empty());
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut balances = Balances::new();
        balances.credit("a", 300).unwrap();
        balances
            .transfer("a", "b", 120, ContractError::InsufficientBalance)
            .unwrap();

        assert_eq!(balances.balance_of("a"), 180);
        assert_eq!(balances.balance_of("b"), 120);
        assert_eq!(balances.total(), 300);
    }

    #[test]
    fn test_transfer_shortfall_leaves_ledger_untouched() {
        let mut balances = Balances::new();
        balances.credit("a", 50).unwrap();
        let before = balances.clone();

        let err = balances
            .transfer("a", "b", 51, ContractError::PaymentRequired)
            .unwrap_err();
        assert_eq!(err, ContractError::PaymentRequired);
        assert_eq!(balances, before);
    }

    #[test]
    fn test_credit_overflow_rejected() {
        let mut balances = Balances::new();
        balances.credit("a", Amount::MAX).unwrap();
        assert_eq!(balances.credit("b", 1), Err(ContractError::Overflow));
        assert_eq!(balances.balance_of("b"), 0);
        assert_eq!(balances.total(), Amount::MAX);
    }

    #[test]
    fn test_transfer_to_self_keeps_balance() {
        let mut balances = Balances::new();
        balances.credit("a", 10).unwrap();
        balances
            .transfer("a", "a", 10, ContractError::InsufficientBalance)
            .unwrap();
        assert_eq!(balances.balance_of("a"), 10);
        assert_eq!(
            balances.transfer("a", "a", 11, ContractError::InsufficientBalance),
            Err(ContractError::InsufficientBalance)
        );
    }
}
