//! Product marketplace settled in the native currency

use std::collections::BTreeMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::account::Balances;
use crate::types::{AccountId, Amount, ProductId, FIRST_PRODUCT_ID};
use crate::ContractError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub seller: AccountId,
    pub available: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Marketplace {
    products: BTreeMap<ProductId, Product>,
    last_product_id: ProductId,
    balances: Balances,
}

impl Marketplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists a new product owned by `sender` and returns its id.
    ///
    /// Ids start at 1 and are never reused.
    pub fn list_product(
        &mut self,
        sender: &str,
        name: &str,
        description: &str,
        price: Amount,
    ) -> ProductId {
        let id = self.last_product_id + 1;
        self.last_product_id = id;
        self.products.insert(
            id,
            Product {
                name: name.to_string(),
                description: description.to_string(),
                price,
                seller: sender.to_string(),
                available: true,
            },
        );
        info!("Product {} listed by {} at {}", id, sender, price);
        id
    }

    /// Overwrites price and availability. Only the seller may do this.
    pub fn update_product(
        &mut self,
        sender: &str,
        id: ProductId,
        new_price: Amount,
        new_available: bool,
    ) -> Result<(), ContractError> {
        let product = self.products.get_mut(&id).ok_or_else(|| {
            debug!("Update rejected: product {} not found", id);
            ContractError::NotFound
        })?;
        if product.seller != sender {
            debug!("Update rejected: {} is not the seller of product {}", sender, id);
            return Err(ContractError::Unauthorized);
        }

        product.price = new_price;
        product.available = new_available;
        info!(
            "Product {} updated: price {}, available {}",
            id, new_price, new_available
        );
        Ok(())
    }

    /// Pays the seller from the buyer's balance and takes the product off sale.
    pub fn buy_product(&mut self, sender: &str, id: ProductId) -> Result<(), ContractError> {
        let product = match self.products.get_mut(&id) {
            Some(product) if product.available => product,
            _ => {
                debug!("Purchase rejected: product {} not for sale", id);
                return Err(ContractError::NotFound);
            }
        };

        self.balances
            .transfer(sender, &product.seller, product.price, ContractError::PaymentRequired)
            .inspect_err(|e| debug!("Purchase of product {} by {} rejected: {}", id, sender, e))?;
        product.available = false;

        info!(
            "Product {} bought by {} from {} for {}",
            id, sender, product.seller, product.price
        );
        Ok(())
    }

    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn products(&self) -> impl Iterator<Item = (ProductId, &Product)> {
        self.products.iter().map(|(id, product)| (*id, product))
    }

    pub fn last_product_id(&self) -> ProductId {
        self.last_product_id
    }

    pub fn balance_of(&self, account: &str) -> Amount {
        self.balances.balance_of(account)
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Seeds an account with native currency. Harness use only; no contract
    /// call reaches this.
    pub fn fund(&mut self, account: &str, amount: Amount) -> Result<Amount, ContractError> {
        self.balances.credit(account, amount)
    }

    pub fn reset(&mut self) {
        self.products.clear();
        self.last_product_id = FIRST_PRODUCT_ID - 1;
        self.balances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET_1: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";
    const WALLET_2: &str = "ST2JHG361ZXG51QTKY2NQCVBPPRRE2KZB1HR05NNC";

    fn market_with_listing() -> Marketplace {
        let mut market = Marketplace::new();
        market.list_product(
            WALLET_1,
            "Probiotic Supplement",
            "High-quality probiotic supplement",
            100,
        );
        market
    }

    #[test]
    fn test_list_product() {
        let mut market = Marketplace::new();
        let id = market.list_product(
            WALLET_1,
            "Probiotic Supplement",
            "High-quality probiotic supplement",
            100,
        );
        assert_eq!(id, 1);

        let product = market.get_product(1).unwrap();
        assert_eq!(
            product,
            &Product {
                name: "Probiotic Supplement".to_string(),
                description: "High-quality probiotic supplement".to_string(),
                price: 100,
                seller: WALLET_1.to_string(),
                available: true,
            }
        );
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut market = market_with_listing();
        assert_eq!(market.list_product(WALLET_2, "Kefir", "", 5), 2);
        assert_eq!(market.list_product(WALLET_1, "Kombucha", "", 7), 3);
        assert_eq!(market.last_product_id(), 3);
        assert_eq!(market.products().count(), 3);
    }

    #[test]
    fn test_update_product() {
        let mut market = market_with_listing();
        market.update_product(WALLET_1, 1, 120, true).unwrap();

        let product = market.get_product(1).unwrap();
        assert_eq!(product.price, 120);
        assert!(product.available);
    }

    #[test]
    fn test_update_by_non_seller() {
        let mut market = market_with_listing();
        let err = market.update_product(WALLET_2, 1, 120, false).unwrap_err();
        assert_eq!(err.code(), 401);

        let product = market.get_product(1).unwrap();
        assert_eq!(product.price, 100);
        assert!(product.available);
    }

    #[test]
    fn test_update_unknown_product() {
        let mut market = Marketplace::new();
        assert_eq!(
            market.update_product(WALLET_1, 7, 1, true),
            Err(ContractError::NotFound)
        );
    }

    #[test]
    fn test_buy_product() {
        let mut market = market_with_listing();
        market.fund(WALLET_2, 200).unwrap();

        market.buy_product(WALLET_2, 1).unwrap();

        assert_eq!(market.balance_of(WALLET_1), 100);
        assert_eq!(market.balance_of(WALLET_2), 100);
        assert!(!market.get_product(1).unwrap().available);
        assert_eq!(market.balances().total(), 200);
    }

    #[test]
    fn test_buy_with_insufficient_balance() {
        let mut market = market_with_listing();
        market.fund(WALLET_2, 50).unwrap();

        let err = market.buy_product(WALLET_2, 1).unwrap_err();
        assert_eq!(err.code(), 402);

        assert!(market.get_product(1).unwrap().available);
        assert_eq!(market.balance_of(WALLET_1), 0);
        assert_eq!(market.balance_of(WALLET_2), 50);
    }

    #[test]
    fn test_buy_unavailable_product() {
        let mut market = market_with_listing();
        market.fund(WALLET_2, 500).unwrap();
        market.update_product(WALLET_1, 1, 100, false).unwrap();

        assert_eq!(market.buy_product(WALLET_2, 1), Err(ContractError::NotFound));
        assert_eq!(market.buy_product(WALLET_2, 9), Err(ContractError::NotFound));
        assert_eq!(market.balance_of(WALLET_2), 500);
    }

    #[test]
    fn test_second_purchase_fails() {
        let mut market = market_with_listing();
        market.fund(WALLET_2, 300).unwrap();
        market.buy_product(WALLET_2, 1).unwrap();

        assert_eq!(market.buy_product(WALLET_2, 1), Err(ContractError::NotFound));
        assert_eq!(market.balance_of(WALLET_2), 200);
    }

    #[test]
    fn test_seller_buys_own_product() {
        let mut market = market_with_listing();
        market.fund(WALLET_1, 100).unwrap();

        market.buy_product(WALLET_1, 1).unwrap();
        assert_eq!(market.balance_of(WALLET_1), 100);
        assert!(!market.get_product(1).unwrap().available);
    }

    #[test]
    fn test_reset_restarts_ids() {
        let mut market = market_with_listing();
        market.fund(WALLET_2, 10).unwrap();
        market.reset();

        assert!(market.get_product(1).is_none());
        assert_eq!(market.balance_of(WALLET_2), 0);
        assert_eq!(market.list_product(WALLET_1, "Kefir", "", 5), 1);
    }
}
