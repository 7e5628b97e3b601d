//! marketplace and token simulation

use anyhow::Result;
use colored::Colorize;
use microbiome_sim::{scenarios, WalletPresets};

fn main() -> Result<()> {
    env_logger::init();

    println!("{}", "Microbiome Market Simulation".bright_blue().bold());
    println!("{}", "============================".bright_blue());

    let presets = vec![
        ("Testnet Wallets", WalletPresets::testnet()),
        ("Local Wallets", WalletPresets::local()),
    ];

    for (name, wallets) in presets {
        println!("{}", format!("\n>>> Running: {}", name).bright_green().bold());
        println!("Owner: {}", wallets.owner);
        println!("Seller: {}", wallets.seller);
        println!("Buyer: {}", wallets.buyer);

        scenarios::marketplace_test(&wallets)?;
        scenarios::token_test(&wallets)?;
        scenarios::random_trading(&wallets, 1_000, 2024)?;

        println!("{}", "Scenario complete!".bright_yellow());
        println!("{}", "-".repeat(50));
    }

    println!("\n{}", "All simulations complete!".bright_green().bold());
    Ok(())
}
