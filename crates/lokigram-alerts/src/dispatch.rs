//! Bounded, fire-and-forget alert dispatch.
//!
//! Matched log lines are handed off here and the HTTP request moves
//! on; nothing upstream ever waits on, or learns about, delivery. A
//! naive spawn-per-line design would let a log storm fan out into an
//! unbounded number of in-flight Telegram calls, so dispatch runs as a
//! fixed pool of workers fed by a bounded queue. When the queue is
//! full the newest job is dropped and the drop is logged; alerting on
//! a flood is best-effort by definition.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::route::Destination;
use crate::telegram::Notify;

/// One alert ready for delivery.
#[derive(Debug, Clone)]
pub struct DispatchJob {
    /// Where to send it.
    pub destination: Destination,
    /// Formatted MarkdownV2 body.
    pub body: String,
}

/// What happened to an enqueue attempt.
///
/// Delivery itself is observed only through worker logs; the caller
/// sees just the queue interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The job was accepted by the queue.
    Enqueued,
    /// The queue was full; the job was dropped.
    Dropped,
    /// All workers have shut down; the job was discarded.
    Closed,
}

/// Handle to the dispatch worker pool.
///
/// Cloning is cheap; clones feed the same queue. Dropping every handle
/// closes the queue and lets the workers drain and exit.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<DispatchJob>,
}

impl Dispatcher {
    /// Spawns `workers` delivery tasks behind a queue of
    /// `queue_capacity` jobs and returns the feeding handle.
    ///
    /// Both bounds are clamped to at least one. Workers run until the
    /// queue closes; there is no cancellation path, and an in-flight
    /// send always runs to completion or failure.
    #[must_use]
    pub fn spawn<N: Notify>(notifier: Arc<N>, workers: usize, queue_capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<DispatchJob>(queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        for worker in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            let notifier = Arc::clone(&notifier);
            tokio::spawn(async move {
                loop {
                    // Hold the lock only while receiving, not while sending,
                    // so workers deliver concurrently.
                    let job = rx.lock().await.recv().await;
                    let Some(job) = job else { break };

                    match notifier.send(&job.destination, &job.body).await {
                        Ok(()) => {
                            debug!(worker, chat_id = job.destination.chat_id, "alert delivered");
                        }
                        Err(e) => {
                            error!(
                                worker,
                                chat_id = job.destination.chat_id,
                                error = %e,
                                "alert delivery failed"
                            );
                        }
                    }
                }
                debug!(worker, "dispatch worker stopped");
            });
        }

        Self { tx }
    }

    /// Offers a job to the queue without blocking.
    ///
    /// Never waits: a full queue drops the job (logged at warn), a
    /// closed queue discards it (logged at error). Delivery failures
    /// are logged by the workers and never reported back.
    pub fn enqueue(&self, job: DispatchJob) -> DispatchOutcome {
        match self.tx.try_send(job) {
            Ok(()) => DispatchOutcome::Enqueued,
            Err(TrySendError::Full(job)) => {
                warn!(
                    chat_id = job.destination.chat_id,
                    "dispatch queue full, dropping alert"
                );
                DispatchOutcome::Dropped
            }
            Err(TrySendError::Closed(_)) => {
                error!("dispatch queue closed, discarding alert");
                DispatchOutcome::Closed
            }
        }
    }

    /// Remaining queue capacity, for observability.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}
