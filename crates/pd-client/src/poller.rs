//! Fixed-interval status polling
//!
//! After initiating a mobile-money payment or payout the client re-fetches
//! the resource on a fixed interval until a terminal status is observed or
//! the owning task is cancelled. No exponential backoff, no attempt cap; a
//! fetch error during a tick is logged and the loop re-polls on the next
//! tick.

use std::future::Future;
use std::time::Duration;

use pd_core::ApiResult;
use pd_models::{Payout, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Anything with a terminal/non-terminal status can drive the poll loop.
pub trait PollState {
    fn is_terminal(&self) -> bool;
}

impl PollState for Transaction {
    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl PollState for Payout {
    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// How a poll loop ended
#[derive(Debug)]
pub enum PollOutcome<T> {
    /// A terminal status was observed; polling stopped immediately.
    Terminal(T),
    /// The owning task was torn down before a terminal status arrived.
    Cancelled,
    /// The optional deadline elapsed. Never produced unless a deadline was
    /// configured.
    TimedOut,
}

impl<T> PollOutcome<T> {
    pub fn into_terminal(self) -> Option<T> {
        match self {
            PollOutcome::Terminal(value) => Some(value),
            _ => None,
        }
    }
}

/// Drives a fetch closure on a fixed interval until the fetched value
/// reports terminal or the caller cancels.
pub struct StatusPoller {
    interval: Duration,
    max_wait: Option<Duration>,
}

impl StatusPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_wait: None,
        }
    }

    /// Add an overall deadline. Unset by default; interactive callers bound
    /// their wait, the poll loop itself has no attempt cap.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub async fn run<T, F, Fut>(&self, cancel: &CancellationToken, mut fetch: F) -> PollOutcome<T>
    where
        T: PollState,
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let deadline = self.max_wait.map(|limit| tokio::time::Instant::now() + limit);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => return PollOutcome::Cancelled,
                _ = tokio::time::sleep(self.interval) => {}
            }

            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    return PollOutcome::TimedOut;
                }
            }

            match fetch().await {
                Ok(state) if state.is_terminal() => return PollOutcome::Terminal(state),
                Ok(_) => {}
                Err(error) => warn!(%error, "status poll tick failed, re-polling"),
            }
        }
    }
}
