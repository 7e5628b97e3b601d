use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Wire shape of a contract call: `{ success, value? }` or `{ success, error }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<u32>,
}

impl<T> CallResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            success: true,
            value: Some(value),
            error: None,
        }
    }

    pub fn err(error: ContractError) -> Self {
        Self {
            success: false,
            value: None,
            error: Some(error.code()),
        }
    }

    /// Success with no value, as returned by update/buy/mint/transfer.
    pub fn done() -> Self {
        Self {
            success: true,
            value: None,
            error: None,
        }
    }

    /// Wire result of an operation that yields no value on success.
    pub fn completed(result: Result<(), ContractError>) -> Self {
        match result {
            Ok(()) => CallResult::done(),
            Err(e) => CallResult::err(e),
        }
    }
}

impl<T> From<Result<T, ContractError>> for CallResult<T> {
    fn from(result: Result<T, ContractError>) -> Self {
        match result {
            Ok(value) => CallResult::ok(value),
            Err(e) => CallResult::err(e),
        }
    }
}
