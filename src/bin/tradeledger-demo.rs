//! Trading ledger walkthrough
//!
//! Demonstrates the account lifecycle end to end: opening with an initial
//! deposit, trading against a fixed price table, valuation, history, and
//! the rejected-operation cases.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin tradeledger-demo
//! ```

use std::sync::Arc;
use std::time::Duration;

use tradeledger::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== tradeledger walkthrough ===\n");

    // Fixed price table standing in for a live market-data feed.
    let mut prices = StaticPriceOracle::new()
        .with_price("AAPL", 150.0)
        .with_price("TSLA", 250.0)
        .with_price("GOOGL", 2800.0);

    let store = AccountStore::new();

    println!("1. Opening account for trader123 with 10,000.00...");
    let handle = store.open_account("trader123", 10_000.0)?;
    {
        let account = lock_account(&handle);
        println!("   cash balance: {:.2}", account.cash_balance());
    }

    println!("\n2. Depositing 2,000.00...");
    let balance = lock_account(&handle).deposit(2_000.0)?;
    println!("   cash balance: {:.2}", balance);

    println!("\n3. Buying 10 shares of ' aapl ' (normalized to AAPL)...");
    let receipt = lock_account(&handle).buy_shares(" aapl ", 10, &prices)?;
    println!(
        "   bought {} {} @ {:.2}, total cost {:.2}",
        receipt.quantity, receipt.symbol, receipt.price_per_unit, receipt.total_cost
    );

    println!("\n4. AAPL moves to 160.00; selling all 10 shares...");
    prices.set_price("AAPL", 160.0);
    let receipt = lock_account(&handle).sell_shares("AAPL", 10, &prices)?;
    println!(
        "   sold {} {} @ {:.2}, total proceeds {:.2}",
        receipt.quantity, receipt.symbol, receipt.price_per_unit, receipt.total_proceeds
    );

    println!("\n5. Portfolio summary...");
    {
        let account = lock_account(&handle);
        let summary = summarize(&account, &prices)?;
        println!("   cash balance:          {:.2}", summary.cash_balance);
        println!("   net deposits:          {:.2}", summary.net_deposits);
        println!("   total shares value:    {:.2}", summary.total_shares_value);
        println!("   total portfolio value: {:.2}", summary.total_portfolio_value);
        println!("   profit/loss:           {:+.2}", summary.profit_loss);
        for holding in &summary.holdings {
            println!(
                "   holding: {} x{} -> {:.2}",
                holding.symbol, holding.quantity, holding.value
            );
        }
    }

    println!("\n6. Transaction history (most recent first)...");
    for txn in lock_account(&handle).history() {
        println!("   {}", txn);
    }

    println!("\n7. Rejected operations leave the account untouched...");
    let mut account = lock_account(&handle);

    match account.withdraw(99_999.0) {
        Err(err) => println!("   withdraw(99999): {}", err),
        Ok(_) => anyhow::bail!("withdrawal above balance must fail"),
    }
    match account.buy_shares("FAKE", 1, &prices) {
        Err(err) => println!("   buy(FAKE):       {}", err),
        Ok(_) => anyhow::bail!("unknown symbol must fail"),
    }
    match account.sell_shares("AAPL", 99, &prices) {
        Err(err) => println!("   sell(AAPL, 99):  {}", err),
        Ok(_) => anyhow::bail!("selling more than owned must fail"),
    }
    match account.deposit(-100.0) {
        Err(err) => println!("   deposit(-100):   {}", err),
        Ok(_) => anyhow::bail!("negative deposit must fail"),
    }
    println!(
        "   cash balance still {:.2}, {} transactions",
        account.cash_balance(),
        account.transactions().len()
    );
    drop(account);

    println!("\n8. Valuation through a deadline-bounded oracle...");
    let bounded = DeadlineOracle::new(Arc::new(prices), Duration::from_millis(250));
    let account = lock_account(&handle);
    let summary = summarize(&account, &bounded)?;
    println!(
        "   total portfolio value: {:.2} (profit/loss {:+.2})",
        summary.total_portfolio_value, summary.profit_loss
    );

    println!("\nDone.");
    Ok(())
}
