//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Derive DID key → Submit → Poll
//!
//! Shutdown:
//!     SIGINT → shutdown channel → poll session winds down → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing partial runs
//! - Cancellation is cooperative; no timer or request outlives the session

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
