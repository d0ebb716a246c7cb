//! Transaction records and the append-only account history
//!
//! A Transaction is created when a ledger operation succeeds and is never
//! mutated afterwards. Ordering authority is the per-account `sequence`
//! counter, not the wall-clock timestamp: two operations inside the same
//! clock tick still get distinct, ordered sequence numbers.

use crate::types::{Cash, Price, Quantity, Sequence, Symbol, Timestamp, TransactionId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of financial event recorded against an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Buy,
    Sell,
}

impl TransactionKind {
    /// Check if this kind carries trade fields (symbol/quantity/price)
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionKind::Buy | TransactionKind::Sell)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "DEPOSIT"),
            TransactionKind::Withdrawal => write!(f, "WITHDRAWAL"),
            TransactionKind::Buy => write!(f, "BUY"),
            TransactionKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A single immutable financial event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID
    pub id: TransactionId,
    /// Monotonic per-account counter; the ordering authority
    pub sequence: Sequence,
    /// Wall-clock creation time (display metadata only)
    pub timestamp: Timestamp,
    /// Kind of event
    pub kind: TransactionKind,
    /// Instrument symbol, present only for BUY/SELL
    pub symbol: Option<Symbol>,
    /// Shares traded, present only for BUY/SELL
    pub quantity: Option<Quantity>,
    /// Execution price, present only for BUY/SELL
    pub price_per_unit: Option<Price>,
    /// Cash delta magnitude of the event, always positive
    pub total_amount: Cash,
}

impl Transaction {
    fn cash_event(sequence: Sequence, kind: TransactionKind, amount: Cash) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            timestamp: Utc::now(),
            kind,
            symbol: None,
            quantity: None,
            price_per_unit: None,
            total_amount: amount,
        }
    }

    fn trade_event(
        sequence: Sequence,
        kind: TransactionKind,
        symbol: &str,
        quantity: Quantity,
        price_per_unit: Price,
        total_amount: Cash,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            timestamp: Utc::now(),
            kind,
            symbol: Some(symbol.to_string()),
            quantity: Some(quantity),
            price_per_unit: Some(price_per_unit),
            total_amount,
        }
    }

    /// Check if this transaction carries trade fields
    pub fn is_trade(&self) -> bool {
        self.kind.is_trade()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.symbol, self.quantity, self.price_per_unit) {
            (Some(symbol), Some(quantity), Some(price)) => write!(
                f,
                "#{} {} {} {} @ {:.2} ({:.2})",
                self.sequence, self.kind, quantity, symbol, price, self.total_amount
            ),
            _ => write!(f, "#{} {} {:.2}", self.sequence, self.kind, self.total_amount),
        }
    }
}

/// Append-only, strictly ordered transaction history for one account
///
/// The log performs no validation; it only stores and orders. Appends are
/// O(1) and assign the next sequence value, which is never reused.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
    next_sequence: Sequence,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            // Sequence 1 is the account's opening deposit.
            next_sequence: 1,
        }
    }

    fn append(&mut self, build: impl FnOnce(Sequence) -> Transaction) -> Sequence {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.transactions.push(build(sequence));
        sequence
    }

    /// Record a DEPOSIT or WITHDRAWAL event
    pub(crate) fn record_cash(&mut self, kind: TransactionKind, amount: Cash) -> Sequence {
        self.append(|sequence| Transaction::cash_event(sequence, kind, amount))
    }

    /// Record a BUY or SELL event
    pub(crate) fn record_trade(
        &mut self,
        kind: TransactionKind,
        symbol: &str,
        quantity: Quantity,
        price_per_unit: Price,
        total_amount: Cash,
    ) -> Sequence {
        self.append(|sequence| {
            Transaction::trade_event(sequence, kind, symbol, quantity, price_per_unit, total_amount)
        })
    }

    /// All transactions in insertion (sequence) order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Independent copy of the history, most recent first
    ///
    /// Ordered by descending sequence; timestamps are not consulted.
    pub fn history(&self) -> Vec<Transaction> {
        self.transactions.iter().rev().cloned().collect()
    }

    /// Number of recorded transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Cumulative deposits minus cumulative withdrawals over the full log
    pub fn net_deposits(&self) -> Cash {
        self.transactions
            .iter()
            .map(|txn| match txn.kind {
                TransactionKind::Deposit => txn.total_amount,
                TransactionKind::Withdrawal => -txn.total_amount,
                _ => 0.0,
            })
            .sum()
    }
}
