//! Wire types and error definitions for the dispatch service protocol.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Submission endpoint path on the dispatch service.
pub const SUBMISSION_PATH: &str = "/api/v1/submission";

/// Opaque identifier the service assigns to an accepted submission.
///
/// Used as the key for all subsequent status queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SubmissionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a submission as reported by the service.
///
/// `Pending → {InBlock → Finalized} | Failed`, but intermediate states may
/// be skipped between polls; only the reported value counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SubmissionStatus {
    /// Accepted by the service, not yet included in a block.
    Pending,
    /// Included in a block, not yet finalized.
    InBlock,
    /// Included in a finalized block.
    Finalized,
    /// Rejected or dropped on-chain.
    Failed,
}

impl SubmissionStatus {
    /// True for statuses the polling loop must stop on.
    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionStatus::Finalized | SubmissionStatus::Failed)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::InBlock => "InBlock",
            SubmissionStatus::Finalized => "Finalized",
            SubmissionStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// Body of a successful submission response.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionResponse {
    pub id: String,
}

/// Body of a status response. Fields other than `status` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: SubmissionStatus,
}

/// Errors that can occur while talking to the dispatch service.
#[derive(Debug, Error)]
pub enum TxdError {
    /// The signer could not produce a signature over the request digest.
    /// A request is never sent without a valid token.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The token segments could not be assembled.
    #[error("token encoding failed: {0}")]
    TokenEncoding(String),

    /// The request could not be sent or the response body not read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request path did not form a valid URL against the base endpoint.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The service answered with a non-success HTTP status.
    #[error("service responded {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The service answered 2xx but the body was not what the protocol promises.
    #[error("invalid response from service: {0}")]
    InvalidResponse(String),

    /// No terminal status was observed within the polling window.
    #[error("no terminal status for submission {id} within {timeout_secs}s")]
    PollTimeout { id: SubmissionId, timeout_secs: u64 },

    /// The poll session was aborted by a shutdown signal.
    #[error("polling cancelled by shutdown")]
    Cancelled,
}

/// Result type for dispatch service operations.
pub type TxdResult<T> = Result<T, TxdError>;
