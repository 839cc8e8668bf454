//! A FIFO request queue with a minimum spacing between executions.
//!
//! A single background runner pops requests in submission order, waits out whatever remains
//! of `min_interval` since the previous request completed, runs the request to completion,
//! hands the output back to its caller, then pauses for `cooldown`. The queue never retries.

use std::future::Future;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

use crate::core::SvError;
use crate::core::client::constants::{DEFAULT_COOLDOWN, DEFAULT_MIN_INTERVAL};

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// Pacing configuration for a [`RequestQueue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Minimum time between the end of one request and the start of the next.
    pub min_interval: Duration,
    /// Extra pause after every request.
    pub cooldown: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl QueueConfig {
    /// No pacing at all; requests still run one at a time in FIFO order.
    pub const fn unpaced() -> Self {
        Self {
            min_interval: Duration::ZERO,
            cooldown: Duration::ZERO,
        }
    }
}

struct Runner {
    tx: mpsc::UnboundedSender<Job>,
    join: JoinHandle<()>,
}

enum QueueState {
    Idle,
    Running(Runner),
    Closed,
}

/// Serializes calls through one paced runner.
///
/// The runner task is spawned on the first [`enqueue`](Self::enqueue), so a queue can be
/// created outside of a tokio runtime.
pub struct RequestQueue {
    cfg: QueueConfig,
    state: Mutex<QueueState>,
}

impl std::fmt::Debug for RequestQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestQueue")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl RequestQueue {
    /// Creates a queue with the given pacing.
    pub fn new(cfg: QueueConfig) -> Self {
        Self {
            cfg,
            state: Mutex::new(QueueState::Idle),
        }
    }

    /// The pacing this queue enforces.
    pub const fn config(&self) -> QueueConfig {
        self.cfg
    }

    /// Appends `invoke` to the tail of the queue and waits for its output.
    ///
    /// The output of `invoke` is returned as-is; a failing call does not affect later ones.
    ///
    /// # Errors
    ///
    /// Returns `SvError::QueueClosed` if the queue was shut down before the call could run.
    pub async fn enqueue<F, Fut>(&self, invoke: F) -> Result<Fut::Output, SvError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            async move {
                let out = invoke().await;
                // The caller may have stopped waiting; the call still counts against pacing.
                let _ = reply_tx.send(out);
            }
            .boxed()
        });

        {
            let mut state = self.state.lock().await;
            if matches!(*state, QueueState::Idle) {
                *state = QueueState::Running(spawn_runner(self.cfg));
            }
            match &*state {
                QueueState::Running(runner) => {
                    runner.tx.send(job).map_err(|_| SvError::QueueClosed)?;
                }
                QueueState::Closed | QueueState::Idle => return Err(SvError::QueueClosed),
            }
        }

        reply_rx.await.map_err(|_| SvError::QueueClosed)
    }

    /// Stops accepting work and waits for already-queued calls to finish.
    pub async fn shutdown(&self) {
        let runner = {
            let mut state = self.state.lock().await;
            match std::mem::replace(&mut *state, QueueState::Closed) {
                QueueState::Running(runner) => Some(runner),
                QueueState::Idle | QueueState::Closed => None,
            }
        };

        if let Some(Runner { tx, join }) = runner {
            drop(tx);
            let _ = join.await;
            #[cfg(feature = "tracing")]
            tracing::debug!("request queue drained and stopped");
        }
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub async fn is_closed(&self) -> bool {
        matches!(*self.state.lock().await, QueueState::Closed)
    }
}

fn spawn_runner(cfg: QueueConfig) -> Runner {
    let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        min_interval_ms = cfg.min_interval.as_millis() as u64,
        cooldown_ms = cfg.cooldown.as_millis() as u64,
        "starting request queue runner"
    );

    let join = tokio::spawn(async move {
        let mut last_done: Option<Instant> = None;

        while let Some(job) = rx.recv().await {
            if let Some(prev) = last_done {
                let elapsed = prev.elapsed();
                if elapsed < cfg.min_interval {
                    sleep(cfg.min_interval - elapsed).await;
                }
            }

            job().await;
            last_done = Some(Instant::now());

            if !cfg.cooldown.is_zero() {
                sleep(cfg.cooldown).await;
            }
        }
    });

    Runner { tx, join }
}
