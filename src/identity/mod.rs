//! DID identity material.
//!
//! # Security Constraints
//! - Seed phrases ONLY from configuration (environment or CLI)
//! - Never log seed phrases or secret key bytes
//! - One keypair per process; signing is stateless and `&self`

pub mod keypair;

pub use keypair::{DidKeypair, IdentityError};
