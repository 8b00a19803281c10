//! Per-request bearer tokens.
//!
//! Every call to the dispatch service carries a three-segment token in the
//! `Authorization` header: `header.payload.signature`, each segment base64url
//! without padding. The header names the signing key (`{"kid": <key uri>}`),
//! the payload is the Blake2b-256 digest of `path ++ body`, and the signature
//! covers that digest. The shape is JWT-like but the format is private to the
//! service: no algorithm negotiation, no expiry claim.
//!
//! Because the digest commits to the exact request path and body, a token is
//! only valid for the one request it was issued for. Replay within the
//! server-side validity window is a trust boundary the service owns.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::Serialize;

use crate::auth::signer::Signer;
use crate::txd::types::{TxdError, TxdResult};

type Blake2b256 = Blake2b<U32>;

#[derive(Serialize)]
struct TokenHeader<'a> {
    kid: &'a str,
}

/// A bearer token bound to a single request.
#[derive(Debug, Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest the token payload and signature commit to.
pub fn request_digest(path: &str, body: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(path.as_bytes());
    hasher.update(body);
    hasher.finalize().into()
}

/// Issue a token for a single request against `path` with `body`.
///
/// `body` is empty for GET requests. `path` is service-relative and must
/// match the request path byte for byte; the service recomputes the digest
/// on its side and rejects mismatches.
pub fn issue(signer: &dyn Signer, path: &str, body: &[u8]) -> TxdResult<AuthToken> {
    debug_assert!(path.starts_with('/'), "token paths are service-relative");

    let digest = request_digest(path, body);
    let signature = signer
        .sign(&digest)
        .map_err(|e| TxdError::Signing(e.to_string()))?;

    let header_json = serde_json::to_vec(&TokenHeader {
        kid: signer.key_uri(),
    })
    .map_err(|e| TxdError::TokenEncoding(e.to_string()))?;

    let header = URL_SAFE_NO_PAD.encode(header_json);
    let payload = URL_SAFE_NO_PAD.encode(digest);
    let signature = URL_SAFE_NO_PAD.encode(signature);

    Ok(AuthToken(format!("{header}.{payload}.{signature}")))
}
