//! Point-in-time portfolio valuation
//!
//! Read-side only: combines ledger state with live price lookups and never
//! mutates anything. The summary is derived on every call and not stored.

use crate::error::Result;
use crate::ledger::AccountLedger;
use crate::oracle::PriceOracle;
use crate::types::{Cash, Price, Quantity, Symbol};
use serde::{Deserialize, Serialize};

/// One holding with its current price, if any
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedHolding {
    pub symbol: Symbol,
    pub quantity: Quantity,
    /// Current price, or None when the oracle no longer knows the symbol
    pub price: Option<Price>,
    /// quantity x price, zero when the price is unknown
    pub value: Cash,
}

/// Derived snapshot of the account's worth and performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub cash_balance: Cash,
    /// Cumulative deposits minus withdrawals, recomputed from the full log
    pub net_deposits: Cash,
    /// Every held position, priced where possible, sorted by symbol
    pub holdings: Vec<ValuedHolding>,
    pub total_shares_value: Cash,
    /// cash_balance + total_shares_value
    pub total_portfolio_value: Cash,
    /// total_portfolio_value - net_deposits
    pub profit_loss: Cash,
}

/// Compute a read-only summary of the account against live prices
///
/// An unknown price never hides a position: the holding is still listed,
/// contributing zero to the totals. A failing oracle call instead aborts
/// the valuation with `OracleUnavailable`; "no such instrument" and
/// "pricing service down" are different answers.
pub fn summarize(ledger: &AccountLedger, oracle: &dyn PriceOracle) -> Result<PortfolioSummary> {
    let mut holdings: Vec<ValuedHolding> = Vec::with_capacity(ledger.holdings().len());
    for (symbol, &quantity) in ledger.holdings() {
        let price = oracle.lookup(symbol)?;
        let value = price.map(|p| p * quantity as f64).unwrap_or(0.0);
        holdings.push(ValuedHolding {
            symbol: symbol.clone(),
            quantity,
            price,
            value,
        });
    }
    // Deterministic listing regardless of map iteration order.
    holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let total_shares_value: Cash = holdings.iter().map(|h| h.value).sum();
    let cash_balance = ledger.cash_balance();
    let net_deposits = ledger.transaction_log().net_deposits();
    let total_portfolio_value = cash_balance + total_shares_value;

    Ok(PortfolioSummary {
        cash_balance,
        net_deposits,
        holdings,
        total_shares_value,
        total_portfolio_value,
        profit_loss: total_portfolio_value - net_deposits,
    })
}
