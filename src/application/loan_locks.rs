//! Per-loan exclusive locks for lifecycle writes.
//!
//! Investment commits are read-check-write sequences (read total invested,
//! check against principal, insert investment, maybe update loan state)
//! spanning several gateway calls; approval and disbursement are shorter
//! read-then-write sequences with a state precondition. Without isolation two
//! concurrent writers against the same loan can both pass their precondition:
//! commits jointly overfund the loan, and a second approval silently
//! overwrites the first approver's metadata. This registry serializes writers
//! per loan: at most one in-flight lifecycle write per loan, while writes
//! against different loans proceed independently.
//!
//! Entries are evicted when the last guard for a loan is dropped and no other
//! task is waiting, so the registry only holds loans with in-flight writes.
//!
//! The locks are process-local; deployments running multiple instances
//! against one database must scope writes by loan row instead (see DESIGN.md).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::LoanId;

type Registry = Mutex<HashMap<LoanId, Arc<AsyncMutex<()>>>>;

/// Registry of per-loan async mutexes.
pub struct LoanLocks {
    locks: Arc<Registry>,
}

/// Exclusive hold on one loan's lock.
///
/// The critical section ends when this guard is dropped; dropping also
/// removes the loan's registry entry if no other task is waiting on it.
pub struct LoanLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    loan_id: LoanId,
    locks: Arc<Registry>,
}

impl Drop for LoanLockGuard {
    fn drop(&mut self) {
        // Release the mutex before inspecting the refcount, so this guard's
        // own Arc (held through the owned guard) no longer counts.
        drop(self.guard.take());

        let mut locks = self.locks.lock().expect("LoanLocks: registry lock poisoned");
        if let Some(entry) = locks.get(&self.loan_id) {
            // strong_count == 1 means only the registry itself holds the
            // mutex; any waiter cloned the Arc before blocking.
            if Arc::strong_count(entry) == 1 {
                locks.remove(&self.loan_id);
            }
        }
    }
}

impl LoanLocks {
    /// Creates an empty lock registry.
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Acquires the exclusive lock for one loan, waiting if another write
    /// against the same loan is in flight.
    pub async fn acquire(&self, loan_id: LoanId) -> LoanLockGuard {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .expect("LoanLocks: registry lock poisoned");
            locks
                .entry(loan_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        LoanLockGuard {
            guard: Some(lock.lock_owned().await),
            loan_id,
            locks: self.locks.clone(),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .expect("LoanLocks: registry lock poisoned")
            .len()
    }
}

impl Default for LoanLocks {
    fn default() -> Self {
        Self::new()
    }
}
