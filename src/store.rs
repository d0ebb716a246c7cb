//! Account store - explicit, keyed registry of accounts
//!
//! Replaces the module-global username-to-account mapping with a service
//! that owns account lifecycle and lookup. Each account sits behind its own
//! mutex, so deposit/withdraw/buy/sell serialize per account while
//! different accounts proceed independently. The ledger itself never
//! references the store.

use crate::error::{LedgerError, Result};
use crate::ledger::AccountLedger;
use crate::types::Cash;
use hashbrown::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to one account, serialized by its own mutex
pub type AccountHandle = Arc<Mutex<AccountLedger>>;

/// Lock an account handle, recovering from poisoning
///
/// Ledger operations are all-or-nothing, so the state behind a poisoned
/// lock is still consistent.
pub fn lock_account(handle: &AccountHandle) -> MutexGuard<'_, AccountLedger> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Keyed collection of accounts with per-account locking
#[derive(Default)]
pub struct AccountStore {
    accounts: Mutex<HashMap<String, AccountHandle>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, AccountHandle>> {
        // The registry lock only guards insert/lookup/remove.
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Open a new account under an owner id not yet in use
    pub fn open_account(&self, owner_id: &str, initial_deposit: Cash) -> Result<AccountHandle> {
        let mut registry = self.registry();
        if registry.contains_key(owner_id) {
            return Err(LedgerError::Validation(format!(
                "an account already exists for owner '{}'",
                owner_id
            )));
        }

        let ledger = AccountLedger::open(owner_id, initial_deposit)?;
        let handle: AccountHandle = Arc::new(Mutex::new(ledger));
        registry.insert(owner_id.to_string(), Arc::clone(&handle));

        log::info!("account store: opened account for '{}'", owner_id);
        Ok(handle)
    }

    /// Look up an existing account
    pub fn get(&self, owner_id: &str) -> Option<AccountHandle> {
        self.registry().get(owner_id).map(Arc::clone)
    }

    /// Remove an account from the store, returning its handle if present
    ///
    /// Callers still holding the handle keep a working ledger; the store
    /// simply forgets it (session teardown).
    pub fn remove(&self, owner_id: &str) -> Option<AccountHandle> {
        self.registry().remove(owner_id)
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StaticPriceOracle;
    use std::thread;

    #[test]
    fn test_open_and_get() {
        let store = AccountStore::new();
        store.open_account("alice", 1_000.0).unwrap();

        let handle = store.get("alice").unwrap();
        assert_eq!(lock_account(&handle).cash_balance(), 1_000.0);
        assert_eq!(store.len(), 1);
        assert!(store.get("bob").is_none());
    }

    #[test]
    fn test_duplicate_owner_rejected() {
        let store = AccountStore::new();
        store.open_account("alice", 1_000.0).unwrap();

        let err = store.open_account("alice", 2_000.0).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_deposit_registers_nothing() {
        let store = AccountStore::new();

        assert!(store.open_account("alice", -5.0).is_err());
        assert!(store.is_empty());
        // The owner id stays free for a valid retry.
        assert!(store.open_account("alice", 100.0).is_ok());
    }

    #[test]
    fn test_remove() {
        let store = AccountStore::new();
        store.open_account("alice", 1_000.0).unwrap();

        let handle = store.remove("alice").unwrap();
        assert!(store.get("alice").is_none());
        assert!(store.is_empty());

        // A held handle keeps working after removal.
        assert_eq!(lock_account(&handle).cash_balance(), 1_000.0);
    }

    #[test]
    fn test_concurrent_deposits_serialize_per_account() {
        let store = AccountStore::new();
        let handle = store.open_account("alice", 1_000.0).unwrap();

        let mut workers = Vec::new();
        for _ in 0..8 {
            let handle = Arc::clone(&handle);
            workers.push(thread::spawn(move || {
                for _ in 0..100 {
                    lock_account(&handle).deposit(1.0).unwrap();
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        let ledger = lock_account(&handle);
        assert_eq!(ledger.cash_balance(), 1_800.0);
        // Opening deposit + 800 deposits, each exactly once.
        assert_eq!(ledger.transactions().len(), 801);
    }

    #[test]
    fn test_concurrent_trades_keep_invariants() {
        let store = AccountStore::new();
        let handle = store.open_account("alice", 10_000.0).unwrap();
        let oracle = Arc::new(StaticPriceOracle::new().with_price("AAPL", 100.0));

        // Buyers and sellers race; the per-account mutex keeps every
        // read-validate-mutate sequence atomic.
        let mut workers = Vec::new();
        for _ in 0..4 {
            let handle = Arc::clone(&handle);
            let oracle = Arc::clone(&oracle);
            workers.push(thread::spawn(move || {
                for _ in 0..50 {
                    let mut ledger = lock_account(&handle);
                    if ledger.buy_shares("AAPL", 1, oracle.as_ref()).is_ok() {
                        ledger.sell_shares("AAPL", 1, oracle.as_ref()).unwrap();
                    }
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        let ledger = lock_account(&handle);
        assert_eq!(ledger.cash_balance(), 10_000.0);
        assert!(ledger.holdings().is_empty());
        assert!(ledger.cash_balance() >= 0.0);
    }
}
