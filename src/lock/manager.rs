//! Lazily created per-table mutexes with bounded acquisition.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::warn;

use super::errors::{LockError, LockResult};

/// Default bound on waiting for a table lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-table lock registry.
///
/// Clones share the same registry; separately constructed managers never
/// interfere with each other.
#[derive(Debug, Clone)]
pub struct TableLockManager {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
    timeout: Duration,
}

impl Default for TableLockManager {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_TIMEOUT)
    }
}

impl TableLockManager {
    /// Create a manager with the given acquisition timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
            timeout,
        }
    }

    /// Acquisition timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lock_for(&self, table: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(table.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Waits for exclusive access to `table`.
    ///
    /// The returned guard releases the table when dropped.
    pub async fn acquire(&self, table: &str) -> LockResult<TableGuard> {
        let lock = self.lock_for(table);

        match tokio::time::timeout(self.timeout, lock.lock_owned()).await {
            Ok(guard) => Ok(TableGuard {
                table: table.to_string(),
                _guard: guard,
            }),
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(table = %table, timeout_ms, "table lock acquisition timed out");
                Err(LockError::Timeout {
                    table: table.to_string(),
                    timeout_ms,
                })
            }
        }
    }

    /// Runs `op` while holding the lock for `table`.
    pub async fn run<F, Fut, T, E>(&self, table: &str, op: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let _guard = self.acquire(table).await?;
        op().await
    }

    /// Wraps `op` so each call first locks the table named by its first argument.
    pub fn wrap<F>(&self, op: F) -> Locked<F> {
        Locked {
            locks: self.clone(),
            op,
        }
    }
}

/// Exclusive access to one table
#[derive(Debug)]
pub struct TableGuard {
    table: String,
    _guard: OwnedMutexGuard<()>,
}

impl TableGuard {
    /// Table this guard holds
    pub fn table(&self) -> &str {
        &self.table
    }
}

/// An operation whose calls are serialized per table
#[derive(Debug, Clone)]
pub struct Locked<F> {
    locks: TableLockManager,
    op: F,
}

impl<F> Locked<F> {
    /// Calls the wrapped operation with `(table, args)` under the table lock.
    pub async fn call<A, Fut, T, E>(&self, table: &str, args: A) -> Result<T, E>
    where
        F: Fn(String, A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<LockError>,
    {
        let _guard = self.locks.acquire(table).await?;
        (self.op)(table.to_string(), args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_reports_table() {
        let locks = TableLockManager::default();
        let guard = locks.acquire("t1").await.unwrap();
        assert_eq!(guard.table(), "t1");
        assert_eq!(locks.timeout(), DEFAULT_LOCK_TIMEOUT);
    }

    #[tokio::test]
    async fn test_release_on_drop() {
        let locks = TableLockManager::new(Duration::from_millis(50));
        {
            let _g = locks.acquire("t").await.unwrap();
        }
        assert!(locks.acquire("t").await.is_ok());
    }

    #[tokio::test]
    async fn test_timeout_when_held() {
        let locks = TableLockManager::new(Duration::from_millis(20));
        let _held = locks.acquire("busy").await.unwrap();

        let err = locks.acquire("busy").await.unwrap_err();
        assert_eq!(
            err,
            LockError::Timeout {
                table: "busy".into(),
                timeout_ms: 20
            }
        );
        assert_eq!(err.table(), "busy");
        assert_eq!(err.code(), "CHRONO_LOCK_TIMEOUT");
    }

    #[tokio::test]
    async fn test_other_table_not_blocked() {
        let locks = TableLockManager::new(Duration::from_millis(20));
        let _held = locks.acquire("a").await.unwrap();
        assert!(locks.acquire("b").await.is_ok());
    }

    #[tokio::test]
    async fn test_separate_managers_independent() {
        let first = TableLockManager::new(Duration::from_millis(20));
        let second = TableLockManager::new(Duration::from_millis(20));
        let _held = first.acquire("shared").await.unwrap();
        assert!(second.acquire("shared").await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_registry() {
        let first = TableLockManager::new(Duration::from_millis(20));
        let second = first.clone();
        let _held = first.acquire("shared").await.unwrap();
        assert!(second.acquire("shared").await.is_err());
    }
}
