//! Price oracle contract and adapters
//!
//! The ledger treats pricing as an external collaborator: it asks for a
//! price by normalized symbol and gets back a price, "unknown instrument",
//! or a service failure. The distinction between the last two matters:
//! an unknown symbol rejects the trade, a failed service aborts it.

use crate::error::{LedgerError, Result};
use crate::types::Price;
use hashbrown::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Price lookup capability, keyed by normalized symbol
pub trait PriceOracle: Send + Sync {
    /// Look up the current price for a symbol
    ///
    /// Returns `Ok(Some(price))` for a tradable instrument, `Ok(None)` when
    /// the symbol is not a known instrument, and `Err` only when the pricing
    /// service itself failed. Lookups must be idempotent and side-effect
    /// free. Symbol normalization is the caller's responsibility, not the
    /// oracle's.
    fn lookup(&self, symbol: &str) -> Result<Option<Price>>;
}

/// Fixed in-memory price table
///
/// Used by tests and demos in place of a live market-data feed.
#[derive(Debug, Clone)]
pub struct StaticPriceOracle {
    prices: HashMap<String, Price>,
}

impl StaticPriceOracle {
    /// Create an empty price table
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    /// Builder-style price registration
    pub fn with_price(mut self, symbol: &str, price: Price) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    /// Set or update a price
    pub fn set_price(&mut self, symbol: &str, price: Price) {
        self.prices.insert(symbol.to_string(), price);
    }
}

impl Default for StaticPriceOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceOracle for StaticPriceOracle {
    fn lookup(&self, symbol: &str) -> Result<Option<Price>> {
        Ok(self.prices.get(symbol).copied())
    }
}

/// Deadline-bounded wrapper around another oracle
///
/// Runs the inner lookup on a worker thread and waits at most `timeout` for
/// the answer. A lookup that overruns the deadline (or whose worker died)
/// surfaces as `OracleUnavailable` instead of blocking the account's
/// critical section indefinitely.
pub struct DeadlineOracle {
    inner: Arc<dyn PriceOracle>,
    timeout: Duration,
}

impl DeadlineOracle {
    pub fn new(inner: Arc<dyn PriceOracle>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl PriceOracle for DeadlineOracle {
    fn lookup(&self, symbol: &str) -> Result<Option<Price>> {
        let (tx, rx) = mpsc::channel();
        let oracle = Arc::clone(&self.inner);
        let query = symbol.to_string();

        // The worker may outlive the deadline; the send then fails on a
        // dropped receiver, which is fine.
        thread::spawn(move || {
            let _ = tx.send(oracle.lookup(&query));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "price lookup for {} exceeded {}ms deadline",
                    symbol,
                    self.timeout.as_millis()
                );
                Err(LedgerError::OracleUnavailable(format!(
                    "price lookup for {} timed out after {}ms",
                    symbol,
                    self.timeout.as_millis()
                )))
            }
        }
    }
}
