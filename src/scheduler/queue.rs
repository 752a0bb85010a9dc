//! Request Scheduler Module
//!
//! FIFO queue with a windowed admission rate, shared by every caller that
//! talks to the upstream stats API.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::scheduler::AdmissionWindow;

/// A queued unit of work: runs the submitted operation and reports the
/// outcome through its completion channel.
type ScheduledTask = BoxFuture<'static, ()>;

// == Request Scheduler ==
/// Rate-limiting task queue for upstream requests.
///
/// Work enters through [`submit`] and is admitted by a single drain loop
/// that enforces the sliding-window cap. Submissions never execute
/// synchronously, even when the queue is empty, so admission bookkeeping
/// stays in one place. The drain loop is dormant while the queue is empty
/// and is restarted lazily by the next submission.
///
/// Admitted tasks are spawned rather than awaited, so up to
/// `max_per_window` lookups can be in flight per window and a slow task
/// cannot stall the queue behind it. The scheduler is cheap to clone and
/// is shared process-wide.
///
/// [`submit`]: RequestScheduler::submit
#[derive(Clone)]
pub struct RequestScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    state: Mutex<SchedulerState>,
    /// Extra sleep past the computed wait, covering timer granularity
    wait_margin: Duration,
}

struct SchedulerState {
    /// Pending tasks, FIFO
    queue: VecDeque<ScheduledTask>,
    /// Admission timestamps for the rate window
    window: AdmissionWindow,
    /// Whether a drain loop is currently running
    draining: bool,
}

impl RequestScheduler {
    // == Constructor ==
    /// Creates a new scheduler admitting at most `max_per_window` tasks
    /// per sliding `window`.
    pub fn new(max_per_window: usize, window: Duration, wait_margin: Duration) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                state: Mutex::new(SchedulerState {
                    queue: VecDeque::new(),
                    window: AdmissionWindow::new(max_per_window, window),
                    draining: false,
                }),
                wait_margin,
            }),
        }
    }

    // == Submit ==
    /// Enqueues `op` and resolves with its outcome once the scheduler has
    /// admitted and run it.
    ///
    /// Each operation executes exactly once. A failing operation fails
    /// only its own submitter; queued siblings are admitted normally.
    pub async fn submit<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task: ScheduledTask = Box::pin(async move {
            let outcome = op().await;
            // The submitter may have gone away; nothing to deliver then.
            let _ = tx.send(outcome);
        });

        let start_drain = {
            let mut state = self.inner.state.lock().await;
            state.queue.push_back(task);
            if state.draining {
                false
            } else {
                state.draining = true;
                true
            }
        };

        if start_drain {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(drain(inner));
        }

        rx.await.map_err(|_| StatsError::SchedulerClosed)?
    }

    // == Queue Length ==
    /// Returns the number of tasks waiting for admission.
    ///
    /// The queue is unbounded; a persistently full window delays tasks but
    /// never drops them. This counter is the observability hook for that.
    pub async fn queue_len(&self) -> usize {
        self.inner.state.lock().await.queue.len()
    }
}

/// What the drain loop decided to do with the lock held.
enum Step {
    Run(ScheduledTask),
    Wait(Duration),
}

/// The drain loop. Only one runs per scheduler at a time; it owns the
/// admission window for as long as the queue is non-empty.
async fn drain(inner: Arc<SchedulerInner>) {
    loop {
        let step = {
            let mut state = inner.state.lock().await;
            match state.queue.pop_front() {
                None => {
                    // Going idle; the flag is cleared under the same lock
                    // that guards the queue, so a concurrent submit either
                    // sees it and restarts the drain, or we saw its task.
                    state.draining = false;
                    debug!("request queue drained, scheduler idle");
                    return;
                }
                Some(task) => {
                    let now = Instant::now();
                    match state.window.try_admit(now) {
                        None => Step::Run(task),
                        Some(wait) => {
                            // Window full: put the head back and sleep
                            // until the oldest admission ages out.
                            state.queue.push_front(task);
                            Step::Wait(wait)
                        }
                    }
                }
            }
        };

        // Sleep and task execution both happen outside the lock.
        match step {
            Step::Run(task) => {
                tokio::spawn(task);
            }
            Step::Wait(wait) => {
                debug!(wait_ms = wait.as_millis() as u64, "rate window full, waiting");
                sleep(wait + inner.wait_margin).await;
            }
        }
    }
}
