//! Authenticated HTTP client for the dispatch service.
//!
//! # Responsibilities
//! - Submit hex-encoded call data with a request-bound bearer token
//! - Query submission status for the poller
//! - Surface transport errors and service rejections distinctly

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use url::Url;

use crate::auth::signer::Signer;
use crate::auth::token;
use crate::txd::types::{
    StatusResponse, SubmissionId, SubmissionResponse, SubmissionStatus, TxdError, TxdResult,
    SUBMISSION_PATH,
};

/// Client for the submission endpoints of the dispatch service.
#[derive(Clone)]
pub struct TxdClient {
    base_url: Url,
    signer: Arc<dyn Signer>,
    http: reqwest::Client,
}

impl TxdClient {
    /// Create a client against `base_url`, authenticating with `signer`.
    pub fn new(base_url: Url, signer: Arc<dyn Signer>) -> Self {
        Self::with_http_client(base_url, signer, reqwest::Client::new())
    }

    /// Create a client with a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(base_url: Url, signer: Arc<dyn Signer>, http: reqwest::Client) -> Self {
        Self {
            base_url,
            signer,
            http,
        }
    }

    /// Submit hex-encoded call data for dispatch.
    ///
    /// The request body is the call data exactly as provided and the bearer
    /// token is bound to the submission path plus that body. On acceptance
    /// the service answers with the id under which the submission can be
    /// queried. Rejections are fatal for this call; retry policy, if any,
    /// belongs to the caller.
    pub async fn submit(&self, call_data: &str) -> TxdResult<SubmissionId> {
        let token = token::issue(self.signer.as_ref(), SUBMISSION_PATH, call_data.as_bytes())?;
        let url = self.endpoint(SUBMISSION_PATH)?;

        tracing::debug!(url = %url, "Submitting call data");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(call_data.to_owned())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TxdError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SubmissionResponse = serde_json::from_str(&body)
            .map_err(|e| TxdError::InvalidResponse(format!("submission response: {e}")))?;

        tracing::info!(id = %parsed.id, "Submission accepted");
        Ok(SubmissionId::from(parsed.id))
    }

    /// Query the current status of a submission.
    ///
    /// The GET carries a token bound to the id-specific status path with an
    /// empty body.
    pub async fn submission_status(&self, id: &SubmissionId) -> TxdResult<SubmissionStatus> {
        let path = format!("{SUBMISSION_PATH}/{id}");
        let token = token::issue(self.signer.as_ref(), &path, b"")?;
        let url = self.endpoint(&path)?;

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TxdError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: StatusResponse = serde_json::from_str(&body)
            .map_err(|e| TxdError::InvalidResponse(format!("status response: {e}")))?;
        Ok(parsed.status)
    }

    fn endpoint(&self, path: &str) -> TxdResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

impl std::fmt::Debug for TxdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxdClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Source of submission status updates.
///
/// Implemented by [`TxdClient`]; swapped for scripted sources in poller tests.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn submission_status(&self, id: &SubmissionId) -> TxdResult<SubmissionStatus>;
}

#[async_trait]
impl StatusSource for TxdClient {
    async fn submission_status(&self, id: &SubmissionId) -> TxdResult<SubmissionStatus> {
        TxdClient::submission_status(self, id).await
    }
}
