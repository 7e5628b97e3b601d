//! Scripted and randomized scenarios against the mock chain

use anyhow::{ensure, Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use microbiome_core::{Amount, Call, CallBody, CallResult, MockChain, ProductId};

use crate::Wallets;

fn show<T: Serialize>(label: &str, result: &CallResult<T>) -> Result<()> {
    let json = serde_json::to_string(result).context("serializing call result")?;
    println!("  {:<32} {}", label, json);
    Ok(())
}

/// Lists a product, exercises every marketplace guard and settles a sale.
pub fn marketplace_test(wallets: &Wallets) -> Result<()> {
    println!("\n=== Marketplace ===");
    let mut chain = MockChain::new(&wallets.config());

    let listed = chain.execute(&Call::new(
        wallets.seller.as_str(),
        CallBody::ListProduct {
            name: "Probiotic Supplement".to_string(),
            description: "High-quality probiotic supplement".to_string(),
            price: 100,
        },
    ));
    show("list", &listed)?;
    let id = listed.value.context("listing returned no product id")?;

    let stolen = chain.execute(&Call::new(
        wallets.buyer.as_str(),
        CallBody::UpdateProduct {
            product_id: id,
            new_price: 1,
            new_available: true,
        },
    ));
    show("update by non-seller", &stolen)?;
    ensure!(stolen.error == Some(401), "non-seller update was not rejected");

    let repriced = chain.execute(&Call::new(
        wallets.seller.as_str(),
        CallBody::UpdateProduct {
            product_id: id,
            new_price: 120,
            new_available: true,
        },
    ));
    show("update by seller", &repriced)?;

    chain.marketplace.fund(&wallets.buyer, 50)?;
    let short = chain.execute(&Call::new(wallets.buyer.as_str(), CallBody::BuyProduct { product_id: id }));
    show("buy with 50", &short)?;
    ensure!(short.error == Some(402), "underfunded purchase was not rejected");

    chain.marketplace.fund(&wallets.buyer, 150)?;
    let bought = chain.execute(&Call::new(wallets.buyer.as_str(), CallBody::BuyProduct { product_id: id }));
    show("buy with 200", &bought)?;
    ensure!(bought.success, "funded purchase failed");

    let again = chain.execute(&Call::new(wallets.buyer.as_str(), CallBody::BuyProduct { product_id: id }));
    show("buy sold product", &again)?;
    ensure!(again.error == Some(404), "sold product was bought twice");

    let seller = chain.marketplace.balance_of(&wallets.seller);
    let buyer = chain.marketplace.balance_of(&wallets.buyer);
    println!("  seller balance: {}, buyer balance: {}", seller, buyer);
    ensure!(seller == 120 && buyer == 80, "purchase moved the wrong amount");
    Ok(())
}

/// Mints from the owner, rejects a foreign mint and an overdraft, then transfers.
pub fn token_test(wallets: &Wallets) -> Result<()> {
    println!("\n=== Token ===");
    let mut chain = MockChain::new(&wallets.config());

    let minted = chain.execute(&Call::new(
        wallets.owner.as_str(),
        CallBody::Mint {
            amount: 1000,
            recipient: wallets.seller.clone(),
        },
    ));
    show("mint by owner", &minted)?;

    let forged = chain.execute(&Call::new(
        wallets.seller.as_str(),
        CallBody::Mint {
            amount: 1000,
            recipient: wallets.buyer.clone(),
        },
    ));
    show("mint by non-owner", &forged)?;
    ensure!(forged.error == Some(100), "non-owner mint was not rejected");

    let overdraft = chain.execute(&Call::new(
        wallets.seller.as_str(),
        CallBody::Transfer {
            amount: 1500,
            recipient: wallets.buyer.clone(),
        },
    ));
    show("transfer 1500", &overdraft)?;
    ensure!(overdraft.error == Some(101), "overdraft was not rejected");

    let moved = chain.execute(&Call::new(
        wallets.seller.as_str(),
        CallBody::Transfer {
            amount: 500,
            recipient: wallets.buyer.clone(),
        },
    ));
    show("transfer 500", &moved)?;

    let (seller, buyer) = (
        chain.token.get_balance(&wallets.seller),
        chain.token.get_balance(&wallets.buyer),
    );
    println!("  seller tokens: {}, buyer tokens: {}", seller, buyer);
    ensure!(seller == 500 && buyer == 500, "transfer moved the wrong amount");
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TradingStats {
    pub calls: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub minted: Amount,
    pub funded: Amount,
}

/// Fires random calls from the preset wallets and checks after every step
/// that neither ledger created or lost value outside mint and funding.
pub fn random_trading(wallets: &Wallets, rounds: u64, seed: u64) -> Result<TradingStats> {
    println!("\n=== Random trading ({} rounds, seed {}) ===", rounds, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chain = MockChain::new(&wallets.config());
    let mut stats = TradingStats::default();
    let accounts = wallets.all();

    for round in 0..rounds {
        let sender = accounts[rng.random_range(0..accounts.len())];
        let other = accounts[rng.random_range(0..accounts.len())].to_string();

        if rng.random_bool(0.1) {
            let amount = rng.random_range(0..500);
            chain.marketplace.fund(sender, amount)?;
            stats.funded += amount;
            continue;
        }

        let known = chain.marketplace.last_product_id().max(1);
        let product_id: ProductId = rng.random_range(1..=known + 1);
        let body = match rng.random_range(0..5) {
            0 => CallBody::ListProduct {
                name: format!("culture-{}", round),
                description: String::new(),
                price: rng.random_range(0..300),
            },
            1 => CallBody::UpdateProduct {
                product_id,
                new_price: rng.random_range(0..300),
                new_available: rng.random_bool(0.7),
            },
            2 => CallBody::BuyProduct { product_id },
            3 => CallBody::Mint {
                amount: rng.random_range(0..1000),
                recipient: other,
            },
            _ => CallBody::Transfer {
                amount: rng.random_range(0..800),
                recipient: other,
            },
        };

        let call = Call::new(sender, body);
        let result = chain.execute(&call);
        stats.calls += 1;
        if result.success {
            stats.accepted += 1;
            if let CallBody::Mint { amount, .. } = call.body {
                stats.minted += amount;
            }
        } else {
            stats.rejected += 1;
            debug!("Round {} rejected with {:?}", round, result.error);
        }

        ensure!(
            chain.marketplace.balances().total() == stats.funded,
            "marketplace balances drifted at round {}",
            round
        );
        ensure!(
            chain.token.total_supply() == stats.minted,
            "token supply drifted at round {}",
            round
        );
    }

    info!("Random trading finished: {:?}", stats);
    println!(
        "  {} calls, {} accepted, {} rejected, {} minted, {} funded",
        stats.calls, stats.accepted, stats.rejected, stats.minted, stats.funded
    );
    Ok(stats)
}
