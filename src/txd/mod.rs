//! Transaction dispatch service integration.
//!
//! # Data Flow
//! ```text
//! call data (hex)
//!     → auth (token bound to path + body, signed by the DID key)
//!     → client.rs (POST /api/v1/submission → submission id)
//!     → poller.rs (GET /api/v1/submission/{id} each tick until terminal)
//! ```
//!
//! # Design Decisions
//! - Every request carries its own bearer token; nothing is reused
//! - Submission is one attempt; retry policy belongs to the caller
//! - Polling has a single session deadline and reacts to shutdown

pub mod client;
pub mod poller;
pub mod types;

pub use client::{StatusSource, TxdClient};
pub use poller::StatusPoller;
pub use types::{SubmissionId, SubmissionStatus, TxdError, TxdResult};
