use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::marketplace::Marketplace;
use crate::result::CallResult;
use crate::token::Token;
use crate::types::{AccountId, Amount, ProductId, MAX_CALL_SIZE};
use crate::ContractConfig;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("Call is {0} bytes, limit is {max}", max = MAX_CALL_SIZE)]
    TooLarge(usize),

    #[error("Call encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Call decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub sender: AccountId,
    pub body: CallBody,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallBody {
    ListProduct {
        name: String,
        description: String,
        price: Amount,
    },
    UpdateProduct {
        product_id: ProductId,
        new_price: Amount,
        new_available: bool,
    },
    BuyProduct {
        product_id: ProductId,
    },
    Mint {
        amount: Amount,
        recipient: AccountId,
    },
    Transfer {
        amount: Amount,
        recipient: AccountId,
    },
}

impl Call {
    pub fn new(sender: impl Into<AccountId>, body: CallBody) -> Self {
        Self {
            sender: sender.into(),
            body,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CallError> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::standard())?;
        if bytes.len() > MAX_CALL_SIZE {
            return Err(CallError::TooLarge(bytes.len()));
        }
        Ok(bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CallError> {
        if bytes.len() > MAX_CALL_SIZE {
            return Err(CallError::TooLarge(bytes.len()));
        }
        let (call, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(call)
    }
}

/// In-memory stand-in for the chain runtime hosting both contracts.
#[derive(Clone, Debug)]
pub struct MockChain {
    pub marketplace: Marketplace,
    pub token: Token,
}

impl MockChain {
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            marketplace: Marketplace::new(),
            token: Token::new(config),
        }
    }

    /// Runs one call against the contract it targets. The value of a
    /// successful `ListProduct` is the new product id; other calls carry none.
    pub fn execute(&mut self, call: &Call) -> CallResult<ProductId> {
        trace!("Executing {:?} from {}", call.body, call.sender);
        let sender = call.sender.as_str();
        match &call.body {
            CallBody::ListProduct {
                name,
                description,
                price,
            } => CallResult::ok(self.marketplace.list_product(sender, name, description, *price)),
            CallBody::UpdateProduct {
                product_id,
                new_price,
                new_available,
            } => CallResult::completed(self.marketplace.update_product(
                sender,
                *product_id,
                *new_price,
                *new_available,
            )),
            CallBody::BuyProduct { product_id } => {
                CallResult::completed(self.marketplace.buy_product(sender, *product_id))
            }
            CallBody::Mint { amount, recipient } => {
                CallResult::completed(self.token.mint(sender, *amount, recipient))
            }
            CallBody::Transfer { amount, recipient } => {
                CallResult::completed(self.token.transfer(sender, *amount, recipient))
            }
        }
    }

    /// Decodes and runs a call received as bytes.
    pub fn execute_encoded(&mut self, bytes: &[u8]) -> Result<CallResult<ProductId>, CallError> {
        let call = Call::decode(bytes)?;
        Ok(self.execute(&call))
    }

    pub fn reset(&mut self) {
        self.marketplace.reset();
        self.token.reset();
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new(&ContractConfig::default())
    }
}
