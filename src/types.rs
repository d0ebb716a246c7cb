//! Core types shared across the ledger

use chrono::{DateTime, Utc};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Instrument symbol (stored normalized: uppercase, trimmed)
pub type Symbol = String;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Whole-share quantity type
pub type Quantity = u64;

/// Money/cash type
pub type Cash = f64;

/// Monotonic per-account ordering counter
pub type Sequence = u64;

/// Unique identifier for transactions
pub type TransactionId = uuid::Uuid;
