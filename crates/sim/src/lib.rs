//! simulation tools for the microbiome marketplace

pub mod scenarios;

use microbiome_core::types::DEFAULT_CONTRACT_OWNER;
use microbiome_core::{AccountId, ContractConfig};
use serde::{Deserialize, Serialize};

/// Named wallets used across scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallets {
    pub owner: AccountId,
    pub seller: AccountId,
    pub buyer: AccountId,
}

impl Wallets {
    pub fn config(&self) -> ContractConfig {
        ContractConfig {
            owner: self.owner.clone(),
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [self.owner.as_str(), self.seller.as_str(), self.buyer.as_str()]
    }
}

pub struct WalletPresets;

impl WalletPresets {
    pub fn testnet() -> Wallets {
        Wallets {
            owner: DEFAULT_CONTRACT_OWNER.to_string(),
            seller: "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG".to_string(),
            buyer: "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC".to_string(),
        }
    }

    /// Short readable names, handy when reading log output.
    pub fn local() -> Wallets {
        Wallets {
            owner: "owner".to_string(),
            seller: "alice".to_string(),
            buyer: "bob".to_string(),
        }
    }
}
