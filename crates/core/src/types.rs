pub type AccountId = String;
pub type ProductId = u64;
pub type Amount = u64;

pub const MAX_CALL_SIZE: usize = 512;
pub const FIRST_PRODUCT_ID: ProductId = 1;

/// Deployment address of the token contract owner.
pub const DEFAULT_CONTRACT_OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
