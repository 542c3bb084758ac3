use std::{future::Future, sync::Arc};

use dashmap::DashMap;
use tokio::sync::Mutex as AsyncMutex;

/// Registry of per-job exclusive locks.
///
/// Entries are created on first use and dropped again once no task holds
/// or waits on them, so the map only ever contains jobs being mutated.
#[derive(Clone, Default)]
pub struct JobLocks {
    locks: Arc<DashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl JobLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `op` while holding the lock for `job_id`.
    pub async fn run_exclusive<F, Fut, T>(&self, job_id: i64, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let entry = LockEntry {
            locks: self,
            job_id,
            lock: self.acquire(job_id),
        };
        let _guard = entry.lock.lock().await;
        op().await
    }

    /// Number of jobs with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn acquire(&self, job_id: i64) -> Arc<AsyncMutex<()>> {
        self.locks
            .entry(job_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn release(&self, job_id: i64, lock: &Arc<AsyncMutex<()>>) {
        // One reference in the map, one held here: nobody else is waiting.
        self.locks.remove_if(&job_id, |_, existing| {
            Arc::ptr_eq(existing, lock) && Arc::strong_count(existing) == 2
        });
    }
}

/// Releases the registry entry even when the operation is cancelled.
struct LockEntry<'a> {
    locks: &'a JobLocks,
    job_id: i64,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for LockEntry<'_> {
    fn drop(&mut self) {
        self.locks.release(self.job_id, &self.lock);
    }
}
