//! Configuration management.
//!
//! # Data Flow
//! ```text
//! environment (.env supported) + CLI overrides
//!     → loader.rs (gather, report all missing values at once)
//!     → TxdConfig (validated, immutable)
//!     → passed by reference to client and poller
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no ambient global state
//! - Missing credentials are fatal before any network activity
//! - The seed phrase is redacted from all debug output

pub mod loader;
pub mod schema;

pub use loader::{ConfigError, Overrides};
pub use schema::TxdConfig;
