//! Observability.
//!
//! Structured logging via `tracing`; every status change and error carries
//! the submission id as a field. Metrics export is intentionally out of
//! scope for this client.

pub mod logging;
