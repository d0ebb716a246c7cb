//! Error types for tradeledger

use crate::types::{Cash, Quantity};
use thiserror::Error;

/// Main error type for tradeledger
///
/// Every variant is an expected business condition reported to the caller;
/// none is fatal to the process. Variants carry the amounts and symbols a
/// caller needs to render an actionable message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid amount or quantity: {0}")]
    Validation(String),

    #[error("Insufficient funds: required {required:.2}, available {available:.2}")]
    InsufficientFunds { required: Cash, available: Cash },

    #[error("Insufficient shares: cannot sell {requested} {symbol}, only {owned} owned")]
    InsufficientShares {
        symbol: String,
        requested: Quantity,
        owned: Quantity,
    },

    #[error("Unknown symbol: {0}")]
    InvalidSymbol(String),

    #[error("Price oracle unavailable: {0}")]
    OracleUnavailable(String),
}

/// Result type alias for tradeledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
