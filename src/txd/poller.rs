//! Submission status polling.
//!
//! # Responsibilities
//! - Query the status endpoint on a fixed interval
//! - Stop on a terminal status (`Finalized`, `Failed`)
//! - Enforce a single wall-clock deadline for the whole session
//! - Wind down cleanly when the shutdown channel fires

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{interval, timeout};

use crate::txd::client::StatusSource;
use crate::txd::types::{SubmissionId, SubmissionStatus, TxdError, TxdResult};

/// Default wait between successive status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default ceiling on a whole polling session.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

/// Polls a submission until it reaches a terminal state.
#[derive(Debug)]
pub struct StatusPoller<S> {
    source: S,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl<S: StatusSource> StatusPoller<S> {
    /// Create a poller with the default interval and timeout.
    pub fn new(source: S) -> Self {
        Self {
            source,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Override the wait between status queries.
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Override the session deadline.
    pub fn with_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Poll until the submission is `Finalized` or `Failed`.
    ///
    /// The deadline covers the whole session and starts before the first
    /// query; it is never reset on status changes. A query that fails with a
    /// transport error or a malformed body counts as one attempt: it is
    /// logged and the next tick proceeds. A signing failure aborts the
    /// session, since retrying it silently would paper over broken key
    /// material.
    ///
    /// Returns the terminal status, `PollTimeout` when the deadline elapses
    /// in a non-terminal state, or `Cancelled` when the shutdown channel
    /// fires. On every exit path the interval timer and any in-flight
    /// request are dropped with the session.
    pub async fn poll_until_terminal(
        &self,
        id: &SubmissionId,
        mut shutdown: broadcast::Receiver<()>,
    ) -> TxdResult<SubmissionStatus> {
        tokio::select! {
            outcome = timeout(self.poll_timeout, self.poll_loop(id)) => match outcome {
                Ok(terminal) => terminal,
                Err(_) => {
                    tracing::error!(
                        id = %id,
                        timeout_secs = self.poll_timeout.as_secs(),
                        "Timeout, submission pending too long"
                    );
                    Err(TxdError::PollTimeout {
                        id: id.clone(),
                        timeout_secs: self.poll_timeout.as_secs(),
                    })
                }
            },
            _ = shutdown.recv() => {
                tracing::info!(id = %id, "Polling aborted by shutdown");
                Err(TxdError::Cancelled)
            }
        }
    }

    /// Inner loop; only returns on a terminal status or a fatal error.
    async fn poll_loop(&self, id: &SubmissionId) -> TxdResult<SubmissionStatus> {
        let mut ticker = interval(self.poll_interval);
        let mut last_seen: Option<SubmissionStatus> = None;

        loop {
            ticker.tick().await;

            let status = match self.source.submission_status(id).await {
                Ok(status) => status,
                Err(err @ TxdError::Signing(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "Status query failed, retrying next tick");
                    continue;
                }
            };

            if last_seen != Some(status) {
                tracing::info!(id = %id, status = %status, "Submission status changed");
                last_seen = Some(status);
            } else {
                tracing::debug!(id = %id, status = %status, "Submission status unchanged");
            }

            match status {
                SubmissionStatus::Finalized => return Ok(status),
                SubmissionStatus::Failed => {
                    tracing::error!(id = %id, "Submission failed on chain");
                    return Ok(status);
                }
                SubmissionStatus::Pending | SubmissionStatus::InBlock => {}
            }
        }
    }
}
