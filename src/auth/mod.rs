//! Request authentication.
//!
//! # Data Flow
//! ```text
//! (path, body) of an outgoing request
//!     → token.rs (Blake2b-256 digest over path ++ body)
//!     → signer.rs (DID authentication key signs the digest)
//!     → AuthToken (header.payload.signature, base64url segments)
//!     → Authorization: Bearer <token>
//! ```
//!
//! # Design Decisions
//! - One token per request; the digest binds it to that request only
//! - Signing failures abort the request, never degraded to unsigned
//! - Token format is fixed; the service is its only consumer

pub mod signer;
pub mod token;

pub use signer::{Signer, SignerError};
pub use token::AuthToken;
