//! # tradeledger
//!
//! A single-account, single-currency bookkeeping and valuation engine.
//!
//! The crate is built from four collaborators: an append-only
//! [`TransactionLog`](transaction::TransactionLog), an
//! [`AccountLedger`](ledger::AccountLedger) that validates every operation
//! before mutating cash or holdings, a read-only portfolio valuator
//! ([`valuation::summarize`]), and a pluggable
//! [`PriceOracle`](oracle::PriceOracle) supplying current prices.
//! Multi-account lifecycle lives in the [`AccountStore`](store::AccountStore).
//!
//! ## Example
//!
//! ```rust
//! use tradeledger::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let oracle = StaticPriceOracle::new().with_price("AAPL", 150.0);
//!
//! let mut account = AccountLedger::open("trader123", 10_000.0)?;
//! account.deposit(2_000.0)?;
//!
//! let receipt = account.buy_shares("aapl ", 10, &oracle)?;
//! assert_eq!(receipt.total_cost, 1_500.0);
//!
//! let summary = summarize(&account, &oracle)?;
//! assert_eq!(summary.total_portfolio_value, 12_000.0);
//! assert_eq!(summary.profit_loss, 0.0);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ledger;
pub mod oracle;
pub mod store;
pub mod transaction;
pub mod types;
pub mod valuation;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::error::{LedgerError, Result};
    pub use crate::ledger::{normalize_symbol, AccountLedger, BuyReceipt, SellReceipt};
    pub use crate::oracle::{DeadlineOracle, PriceOracle, StaticPriceOracle};
    pub use crate::store::{lock_account, AccountHandle, AccountStore};
    pub use crate::transaction::{Transaction, TransactionKind, TransactionLog};
    pub use crate::types::*;
    pub use crate::valuation::{summarize, PortfolioSummary, ValuedHolding};
}
