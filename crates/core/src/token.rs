//! Owner-minted fungible token

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::account::Balances;
use crate::types::{AccountId, Amount};
use crate::{ContractConfig, ContractError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    owner: AccountId,
    balances: Balances,
}

impl Token {
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            owner: config.owner.clone(),
            balances: Balances::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Credits `recipient` with freshly minted tokens. Owner only.
    pub fn mint(&mut self, sender: &str, amount: Amount, recipient: &str) -> Result<(), ContractError> {
        if sender != self.owner {
            debug!("Mint rejected: {} is not the token owner", sender);
            return Err(ContractError::UnauthorizedMint);
        }
        self.balances
            .credit(recipient, amount)
            .inspect_err(|e| debug!("Mint of {} to {} rejected: {}", amount, recipient, e))?;
        info!("Minted {} to {}", amount, recipient);
        Ok(())
    }

    pub fn transfer(&mut self, sender: &str, amount: Amount, recipient: &str) -> Result<(), ContractError> {
        self.balances
            .transfer(sender, recipient, amount, ContractError::InsufficientBalance)
            .inspect_err(|e| {
                debug!(
                    "Transfer of {} from {} to {} rejected: {}",
                    amount, sender, recipient, e
                )
            })?;
        info!("Transferred {} from {} to {}", amount, sender, recipient);
        Ok(())
    }

    pub fn get_balance(&self, account: &str) -> Amount {
        self.balances.balance_of(account)
    }

    pub fn total_supply(&self) -> Amount {
        self.balances.total()
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Drops every balance. The owner is kept.
    pub fn reset(&mut self) {
        self.balances.clear();
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new(&ContractConfig::default())
    }
}
