//! Per-account lock registry
//!
//! Every account ID maps to exactly one [`AccountLock`] for the lifetime of the
//! registry. Transfers take the locks of both accounts through
//! [`LockRegistry::acquire_pair`], which always acquires in ascending byte order
//! of the IDs. Since every caller follows the same total order, no cycle of
//! waiters can form between two transfers sharing accounts.
//!
//! Handles are never evicted. Growth is bounded by the account population.

use std::sync::Arc;
use std::time::Duration;

use common::error::{Error, Result};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Mutual-exclusion handle for a single account
#[derive(Debug, Clone, Default)]
pub struct AccountLock {
    inner: Arc<Mutex<()>>,
}

impl AccountLock {
    /// Whether both handles guard the same account
    pub fn same_as(&self, other: &AccountLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Wait for the lock, giving up after `timeout`
    ///
    /// Expiry is reported as `TransferFailed` so callers may retry.
    pub async fn acquire(&self, account_id: &str, timeout: Duration) -> Result<OwnedMutexGuard<()>> {
        tokio::time::timeout(timeout, self.inner.clone().lock_owned())
            .await
            .map_err(|_| {
                Error::TransferFailed(format!(
                    "Timed out after {:?} waiting for the lock on account {}",
                    timeout, account_id
                ))
            })
    }
}

/// Locks held for the duration of one transfer
///
/// Dropping the guard releases every lock it holds.
#[derive(Debug)]
pub struct PairGuard {
    guards: Vec<OwnedMutexGuard<()>>,
}

impl PairGuard {
    /// Number of distinct locks held
    pub fn held(&self) -> usize {
        self.guards.len()
    }
}

/// Registry handing out one canonical lock per account ID
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<String, AccountLock>,
}

impl LockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Get the lock for an account, creating it on first use
    pub fn lock_for(&self, account_id: &str) -> AccountLock {
        if let Some(lock) = self.locks.get(account_id) {
            return lock.value().clone();
        }

        // Slow path: the entry API inserts under the shard's write lock, so
        // concurrent first callers all get the same handle.
        self.locks
            .entry(account_id.to_string())
            .or_insert_with(AccountLock::default)
            .value()
            .clone()
    }

    /// Acquire the locks of two accounts in the global order
    ///
    /// Equal IDs resolve to a single lock which is acquired once.
    pub async fn acquire_pair(&self, first: &str, second: &str, timeout: Duration) -> Result<PairGuard> {
        let first_lock = self.lock_for(first);
        let second_lock = self.lock_for(second);

        if first_lock.same_as(&second_lock) {
            let guard = first_lock.acquire(first, timeout).await?;
            debug!("Acquired lock on account {}", first);
            return Ok(PairGuard { guards: vec![guard] });
        }

        let ((low_id, low_lock), (high_id, high_lock)) = if lock_order(first, second) {
            ((first, first_lock), (second, second_lock))
        } else {
            ((second, second_lock), (first, first_lock))
        };

        let low_guard = low_lock.acquire(low_id, timeout).await?;
        // A timeout here drops `low_guard`, releasing the first lock.
        let high_guard = high_lock.acquire(high_id, timeout).await?;
        debug!("Acquired locks on accounts {} and {}", low_id, high_id);

        Ok(PairGuard {
            guards: vec![low_guard, high_guard],
        })
    }

    /// Number of accounts that have a lock
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no lock has been handed out yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Whether `a` is acquired before `b`
///
/// Byte-wise comparison of the IDs; this is the only ordering used anywhere
/// two account locks are held together.
pub fn lock_order(a: &str, b: &str) -> bool {
    a.as_bytes() <= b.as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_for_reuses_handle() {
        let registry = LockRegistry::new();

        let a1 = registry.lock_for("A");
        let a2 = registry.lock_for("A");
        let b = registry.lock_for("B");

        assert!(a1.same_as(&a2));
        assert!(!a1.same_as(&b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lock_order_is_bytewise() {
        assert!(lock_order("101", "456"));
        assert!(!lock_order("456", "101"));
        assert!(lock_order("Z", "a"));
        assert!(lock_order("Id-1", "Id-10"));
    }

    #[tokio::test]
    async fn test_equal_ids_take_one_lock() {
        let registry = LockRegistry::new();

        let guard = registry
            .acquire_pair("A", "A", Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(guard.held(), 1);
    }

    #[tokio::test]
    async fn test_pair_released_on_drop() {
        let registry = LockRegistry::new();
        let timeout = Duration::from_millis(100);

        let guard = registry.acquire_pair("B", "A", timeout).await.unwrap();
        assert_eq!(guard.held(), 2);
        drop(guard);

        let guard = registry.acquire_pair("A", "B", timeout).await.unwrap();
        assert_eq!(guard.held(), 2);
    }

    #[tokio::test]
    async fn test_timeout_reports_transfer_failed() {
        let registry = LockRegistry::new();
        let _held = registry
            .lock_for("A")
            .acquire("A", Duration::from_millis(100))
            .await
            .unwrap();

        let err = registry
            .acquire_pair("A", "B", Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::TransferFailed(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_failed_pair_releases_first_lock() {
        let registry = LockRegistry::new();
        let timeout = Duration::from_millis(20);
        let held_b = registry.lock_for("B").acquire("B", timeout).await.unwrap();

        // "A" is taken first, then "B" times out; "A" must be free again.
        assert!(registry.acquire_pair("A", "B", timeout).await.is_err());
        assert!(registry.lock_for("A").acquire("A", timeout).await.is_ok());

        drop(held_b);
    }
}
