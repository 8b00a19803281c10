//! Signing seam between token issuance and key material.

use thiserror::Error;

/// Failure to produce a signature.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SignerError(pub String);

/// A key that can authenticate requests towards the dispatch service.
///
/// Implementations produce a signature the service verifies against the key
/// referenced by [`key_uri`](Signer::key_uri). A signing failure must be
/// surfaced to the caller; it is never acceptable to send an unsigned or
/// partially signed request.
pub trait Signer: Send + Sync {
    /// Sign an arbitrary byte sequence.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;

    /// Reference to the verification key, e.g. a DID key URI.
    fn key_uri(&self) -> &str;
}
