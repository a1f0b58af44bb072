//! Bounded worker pool for blocking publish calls.
//!
//! Handing an event to the channel blocks the calling thread while the
//! target partition is full, so publishes must never run on the async
//! runtime's threads. The pool has a fixed number of OS worker threads and a
//! bounded job queue; submitting work while the queue is saturated fails
//! fast instead of growing unboundedly.

use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};
use std::sync::{Arc, Mutex};
use std::thread;

use thiserror::Error;
use tokio::sync::oneshot;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Failure to place a job on the pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The job queue is full; new work is rejected rather than queued.
    #[error("publish pool queue is saturated")]
    Saturated,

    /// The pool has been shut down.
    #[error("publish pool is shut down")]
    Shutdown,
}

/// A bounded pool of worker threads executing blocking jobs.
#[derive(Debug)]
pub struct PublishPool {
    sender: Option<SyncSender<Job>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl PublishPool {
    /// Creates a pool with `workers` threads and a job queue holding at most
    /// `queue_depth` pending jobs.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero or the OS refuses to spawn a worker
    /// thread; both only happen at startup.
    #[must_use]
    pub fn new(workers: usize, queue_depth: usize) -> Self {
        assert!(workers > 0, "publish pool needs at least one worker");
        let (sender, receiver) = sync_channel::<Job>(queue_depth);
        let receiver = Arc::new(Mutex::new(receiver));
        let workers = (0..workers)
            .map(|index| {
                let receiver = Arc::clone(&receiver);
                thread::Builder::new()
                    .name(format!("publish-worker-{index}"))
                    .spawn(move || Self::worker_loop(&receiver))
                    .expect("spawning a publish worker thread failed")
            })
            .collect();
        Self {
            sender: Some(sender),
            workers,
        }
    }

    fn worker_loop(receiver: &Mutex<Receiver<Job>>) {
        loop {
            let job = {
                let guard = receiver
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                guard.recv()
            };
            match job {
                Ok(job) => job(),
                // Sender dropped: the pool is shutting down.
                Err(_) => break,
            }
        }
    }

    /// Submits a blocking job and returns a receiver for its result.
    ///
    /// The call itself never blocks: if the queue is full the job is
    /// rejected with `PoolError::Saturated`.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::Saturated` when the queue is full and
    /// `PoolError::Shutdown` when the pool is no longer running.
    pub fn submit<F, R>(&self, job: F) -> Result<oneshot::Receiver<R>, PoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(PoolError::Shutdown)?;
        let (result_tx, result_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            // The submitter may have stopped waiting; that only discards the
            // result, the job itself has already run.
            let _ = result_tx.send(job());
        });
        sender.try_send(job).map_err(|err| match err {
            TrySendError::Full(_) => PoolError::Saturated,
            TrySendError::Disconnected(_) => PoolError::Shutdown,
        })?;
        Ok(result_rx)
    }
}

impl Drop for PublishPool {
    fn drop(&mut self) {
        // Closing the queue lets each worker drain and exit.
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_submitted_jobs_run_and_report_results() {
        // Arrange
        let pool = PublishPool::new(2, 8);
        let counter = Arc::new(AtomicUsize::new(0));

        // Act
        let mut receivers = Vec::new();
        for _ in 0..4 {
            let counter = Arc::clone(&counter);
            receivers.push(
                pool.submit(move || counter.fetch_add(1, Ordering::SeqCst))
                    .unwrap(),
            );
        }
        for receiver in receivers {
            receiver.await.unwrap();
        }

        // Assert
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_saturated_queue_fails_fast() {
        // Arrange: one worker stuck on a slow job, queue depth 1.
        let pool = PublishPool::new(1, 1);
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let _blocked = pool
            .submit(move || {
                let _ = release_rx.recv_timeout(Duration::from_secs(5));
            })
            .unwrap();
        // Give the worker a moment to pick up the blocking job.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let _queued = pool.submit(|| ()).unwrap();

        // Act: queue is now full.
        let result = pool.submit(|| ()).map(drop);

        // Assert
        assert_eq!(result, Err(PoolError::Saturated));
        release_tx.send(()).unwrap();
    }
}
