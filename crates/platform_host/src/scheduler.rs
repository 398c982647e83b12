//! Cooperative task scheduling contracts.
//!
//! Every suspension point in the interactive core goes through [`TaskScheduler`]: spawned
//! command executions, simulated command delays, audio play attempts, and the load-failure
//! guard delay.

use std::{cell::RefCell, rc::Rc};

use futures::{
    executor::{LocalPool, LocalSpawner},
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};

/// Boxed single-threaded task.
pub type TaskFuture = LocalBoxFuture<'static, ()>;

/// Single-threaded task scheduler provided by the host event loop.
pub trait TaskScheduler {
    /// Queues `task` on the host event loop.
    fn spawn_local(&self, task: TaskFuture);

    /// Resolves after roughly `duration_ms` milliseconds.
    fn sleep(&self, duration_ms: u32) -> TaskFuture;
}

/// Deterministic scheduler backed by a [`LocalPool`].
///
/// Spawned tasks make progress only inside [`LocalPoolScheduler::run_until_stalled`], and sleeps
/// complete immediately while recording the requested duration.
#[derive(Clone)]
pub struct LocalPoolScheduler {
    pool: Rc<RefCell<LocalPool>>,
    spawner: LocalSpawner,
    sleeps: Rc<RefCell<Vec<u32>>>,
}

impl Default for LocalPoolScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalPoolScheduler {
    /// Creates an empty pool.
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: Rc::new(RefCell::new(pool)),
            spawner,
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Runs queued tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Sleep durations requested so far, oldest first.
    pub fn requested_sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

impl TaskScheduler for LocalPoolScheduler {
    fn spawn_local(&self, task: TaskFuture) {
        // The pool lives as long as `self`, so the spawner cannot be shut down here.
        let _ = self.spawner.spawn_local(task);
    }

    fn sleep(&self, duration_ms: u32) -> TaskFuture {
        self.sleeps.borrow_mut().push(duration_ms);
        Box::pin(futures::future::ready(()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spawned_tasks_wait_for_the_pool() {
        let scheduler = LocalPoolScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let sleep = scheduler.sleep(250);
        scheduler.spawn_local(Box::pin({
            let ran = ran.clone();
            async move {
                sleep.await;
                ran.set(true);
            }
        }));
        assert!(!ran.get());
        scheduler.run_until_stalled();
        assert!(ran.get());
        assert_eq!(scheduler.requested_sleeps(), vec![250]);
    }
}
