//! Account ledger - the sole mutator of cash and holdings
//!
//! Every operation validates before it mutates: a failed call leaves the
//! account byte-for-byte unchanged and appends nothing to the history. For
//! trades, the price is fetched exactly once and used for both the cash
//! delta and the recorded transaction, so the charged price and the logged
//! price can never disagree.

use crate::error::{LedgerError, Result};
use crate::oracle::PriceOracle;
use crate::transaction::{Transaction, TransactionKind, TransactionLog};
use crate::types::{Cash, Price, Quantity, Symbol};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Normalize a raw symbol for lookup and storage: trimmed and uppercased
///
/// Applied identically on buy, sell, and valuation paths so one instrument
/// never fragments into multiple holdings entries.
pub fn normalize_symbol(raw: &str) -> Symbol {
    raw.trim().to_uppercase()
}

/// Receipt for a completed purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyReceipt {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub price_per_unit: Price,
    pub total_cost: Cash,
}

/// Receipt for a completed sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellReceipt {
    pub symbol: Symbol,
    pub quantity: Quantity,
    pub price_per_unit: Price,
    pub total_proceeds: Cash,
}

/// The authoritative record of one account's cash and holdings
///
/// A ledger is created with a positive opening deposit and lives for the
/// session; lifecycle beyond that (lookup, destruction) belongs to the
/// owning [`AccountStore`](crate::store::AccountStore). Holdings hold an
/// entry for a symbol iff its quantity is positive.
#[derive(Debug, Clone)]
pub struct AccountLedger {
    owner_id: String,
    cash_balance: Cash,
    holdings: HashMap<Symbol, Quantity>,
    log: TransactionLog,
}

fn validate_amount(amount: Cash) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(())
}

fn validate_quantity(quantity: Quantity) -> Result<()> {
    if quantity == 0 {
        return Err(LedgerError::Validation(
            "quantity must be a positive whole number".to_string(),
        ));
    }
    Ok(())
}

impl AccountLedger {
    /// Open a new account with a positive initial deposit
    ///
    /// The opening deposit is recorded as the account's first DEPOSIT
    /// transaction.
    pub fn open(owner_id: impl Into<String>, initial_deposit: Cash) -> Result<Self> {
        validate_amount(initial_deposit)?;

        let mut ledger = Self {
            owner_id: owner_id.into(),
            cash_balance: initial_deposit,
            holdings: HashMap::new(),
            log: TransactionLog::new(),
        };
        ledger.log.record_cash(TransactionKind::Deposit, initial_deposit);

        log::debug!(
            "{}: account opened with {:.2}",
            ledger.owner_id,
            initial_deposit
        );
        Ok(ledger)
    }

    /// Add funds to the cash balance, returning the new balance
    pub fn deposit(&mut self, amount: Cash) -> Result<Cash> {
        validate_amount(amount)?;

        self.cash_balance += amount;
        self.log.record_cash(TransactionKind::Deposit, amount);

        log::debug!("{}: DEPOSIT {:.2}", self.owner_id, amount);
        Ok(self.cash_balance)
    }

    /// Remove funds from the cash balance, returning the new balance
    ///
    /// There is no partial withdrawal: an amount above the balance rejects
    /// the whole operation.
    pub fn withdraw(&mut self, amount: Cash) -> Result<Cash> {
        validate_amount(amount)?;
        if amount > self.cash_balance {
            log::warn!(
                "{}: withdrawal of {:.2} rejected, balance {:.2}",
                self.owner_id,
                amount,
                self.cash_balance
            );
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: self.cash_balance,
            });
        }

        self.cash_balance -= amount;
        self.log.record_cash(TransactionKind::Withdrawal, amount);

        log::debug!("{}: WITHDRAWAL {:.2}", self.owner_id, amount);
        Ok(self.cash_balance)
    }

    /// Buy shares, deducting the cost from the cash balance
    ///
    /// The symbol is normalized before the single price lookup. Errors leave
    /// the account untouched.
    pub fn buy_shares(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        oracle: &dyn PriceOracle,
    ) -> Result<BuyReceipt> {
        validate_quantity(quantity)?;
        let clean = normalize_symbol(symbol);
        if clean.is_empty() {
            return Err(LedgerError::InvalidSymbol(symbol.to_string()));
        }

        let price = oracle
            .lookup(&clean)?
            .ok_or_else(|| LedgerError::InvalidSymbol(clean.clone()))?;

        let total_cost = price * quantity as f64;
        if total_cost > self.cash_balance {
            log::warn!(
                "{}: buy of {} {} rejected, cost {:.2} exceeds balance {:.2}",
                self.owner_id,
                quantity,
                clean,
                total_cost,
                self.cash_balance
            );
            return Err(LedgerError::InsufficientFunds {
                required: total_cost,
                available: self.cash_balance,
            });
        }

        self.cash_balance -= total_cost;
        *self.holdings.entry(clean.clone()).or_insert(0) += quantity;
        self.log
            .record_trade(TransactionKind::Buy, &clean, quantity, price, total_cost);

        log::debug!(
            "{}: BUY {} {} @ {:.2}",
            self.owner_id,
            quantity,
            clean,
            price
        );
        Ok(BuyReceipt {
            symbol: clean,
            quantity,
            price_per_unit: price,
            total_cost,
        })
    }

    /// Sell shares, adding the proceeds to the cash balance
    ///
    /// Owned quantity is checked before the oracle is consulted. A held
    /// symbol was priced at buy time, but the price lookup can still come
    /// back empty (delisting) and is checked again here.
    pub fn sell_shares(
        &mut self,
        symbol: &str,
        quantity: Quantity,
        oracle: &dyn PriceOracle,
    ) -> Result<SellReceipt> {
        validate_quantity(quantity)?;
        let clean = normalize_symbol(symbol);
        if clean.is_empty() {
            return Err(LedgerError::InvalidSymbol(symbol.to_string()));
        }

        let owned = self.holdings.get(&clean).copied().unwrap_or(0);
        if quantity > owned {
            log::warn!(
                "{}: sell of {} {} rejected, only {} owned",
                self.owner_id,
                quantity,
                clean,
                owned
            );
            return Err(LedgerError::InsufficientShares {
                symbol: clean,
                requested: quantity,
                owned,
            });
        }

        let price = oracle
            .lookup(&clean)?
            .ok_or_else(|| LedgerError::InvalidSymbol(clean.clone()))?;

        let total_proceeds = price * quantity as f64;
        self.cash_balance += total_proceeds;

        let remaining = owned - quantity;
        if remaining == 0 {
            self.holdings.remove(&clean);
        } else {
            self.holdings.insert(clean.clone(), remaining);
        }
        self.log
            .record_trade(TransactionKind::Sell, &clean, quantity, price, total_proceeds);

        log::debug!(
            "{}: SELL {} {} @ {:.2}",
            self.owner_id,
            quantity,
            clean,
            price
        );
        Ok(SellReceipt {
            symbol: clean,
            quantity,
            price_per_unit: price,
            total_proceeds,
        })
    }

    /// Opaque owner identifier, immutable after creation
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Current cash balance
    pub fn cash_balance(&self) -> Cash {
        self.cash_balance
    }

    /// Current holdings by normalized symbol
    ///
    /// Symbols with zero quantity are never present.
    pub fn holdings(&self) -> &HashMap<Symbol, Quantity> {
        &self.holdings
    }

    /// Quantity held for a symbol (raw input is normalized first)
    pub fn holding_quantity(&self, symbol: &str) -> Quantity {
        self.holdings
            .get(&normalize_symbol(symbol))
            .copied()
            .unwrap_or(0)
    }

    /// Read-only view of the transaction log
    pub fn transaction_log(&self) -> &TransactionLog {
        &self.log
    }

    /// All transactions in sequence order
    pub fn transactions(&self) -> &[Transaction] {
        self.log.transactions()
    }

    /// Independent copy of the history, most recent first
    pub fn history(&self) -> Vec<Transaction> {
        self.log.history()
    }
}
