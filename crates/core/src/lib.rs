//! core data types and contract mocks for the microbiome marketplace

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod account;
pub mod marketplace;
pub mod result;
pub mod token;
pub mod transaction;
pub mod types;

pub use account::Balances;
pub use marketplace::{Marketplace, Product};
pub use result::CallResult;
pub use token::Token;
pub use transaction::{Call, CallBody, CallError, MockChain};
pub use types::{AccountId, Amount, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("Product not found or no longer available")]
    NotFound,

    #[error("Sender is not the product seller")]
    Unauthorized,

    #[error("Buyer balance does not cover the price")]
    PaymentRequired,

    #[error("Only the contract owner may mint")]
    UnauthorizedMint,

    #[error("Sender token balance too low")]
    InsufficientBalance,

    #[error("Balance overflow")]
    Overflow,
}

impl ContractError {
    /// Numeric code reported in the `error` field of a failed call.
    pub fn code(&self) -> u32 {
        match self {
            ContractError::NotFound => 404,
            ContractError::Unauthorized => 401,
            ContractError::PaymentRequired => 402,
            ContractError::UnauthorizedMint => 100,
            ContractError::InsufficientBalance => 101,
            ContractError::Overflow => 102,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub owner: AccountId,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            owner: types::DEFAULT_CONTRACT_OWNER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ContractError::NotFound.code(), 404);
        assert_eq!(ContractError::Unauthorized.code(), 401);
        assert_eq!(ContractError::PaymentRequired.code(), 402);
        assert_eq!(ContractError::UnauthorizedMint.code(), 100);
        assert_eq!(ContractError::InsufficientBalance.code(), 101);
    }

    #[test]
    fn test_default_owner() {
        let config = ContractConfig::default();
        assert_eq!(config.owner, types::DEFAULT_CONTRACT_OWNER);
    }
}
