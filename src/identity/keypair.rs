//! DID authentication key management.
//!
//! # Security
//! - The seed phrase comes from configuration only and is never logged
//! - Derivation follows the wallet convention for DID authentication keys

use std::fmt;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use sp_core::crypto::{Ss58AddressFormat, Ss58Codec as _};
use sp_core::{sr25519, Pair as _};
use thiserror::Error;

use crate::auth::signer::{Signer, SignerError};

type Blake2b256 = Blake2b<U32>;

/// Hard derivation path for the DID authentication key.
///
/// Matches the path browser wallets use when creating the DID, so the key
/// derived here is the one registered on-chain.
pub const AUTH_KEY_DERIVATION: &str = "//did//0";

/// SS58 network prefix of the chain the DIDs live on.
pub const SS58_PREFIX: u16 = 38;

// Key discriminants hashed into the key identifier.
const PUBLIC_VERIFICATION_KEY: u8 = 0x00;
const SR25519: u8 = 0x01;

/// Errors while turning a seed phrase into usable key material.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The seed phrase or derivation path could not produce a keypair.
    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// sr25519 DID authentication keypair with its derived identifiers.
pub struct DidKeypair {
    pair: sr25519::Pair,
    did: String,
    key_uri: String,
}

impl DidKeypair {
    /// Derive the authentication key from a mnemonic seed phrase.
    ///
    /// Assumes the DID was created from the same seed and its authentication
    /// key never rotated; otherwise the derived key URI will not match the
    /// on-chain key and the service will reject every token.
    pub fn from_seed_phrase(seed_phrase: &str) -> Result<Self, IdentityError> {
        let uri = format!("{seed_phrase}{AUTH_KEY_DERIVATION}");
        let (pair, _seed) = sr25519::Pair::from_string_with_seed(&uri, None)
            .map_err(|e| IdentityError::Derivation(format!("{e:?}")))?;

        let public = pair.public();
        let did = format!(
            "did:kilt:{}",
            public.to_ss58check_with_version(Ss58AddressFormat::custom(SS58_PREFIX))
        );
        let key_uri = format!("{did}#0x{}", hex::encode(key_hash(&public)));

        tracing::info!(did = %did, "DID authentication key derived");

        Ok(Self { pair, did, key_uri })
    }

    /// Replace the derived key URI with an explicitly configured one.
    ///
    /// Deployments that know the on-chain key identifier (e.g. after a key
    /// rotation) pass it through configuration instead of deriving it.
    pub fn with_key_uri(mut self, key_uri: String) -> Self {
        self.key_uri = key_uri;
        self
    }

    /// The DID this key authenticates for.
    pub fn did(&self) -> &str {
        &self.did
    }

    /// The public half of the authentication key.
    pub fn public(&self) -> sr25519::Public {
        self.pair.public()
    }
}

impl Signer for DidKeypair {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let signature = self.pair.sign(message);
        Ok(AsRef::<[u8]>::as_ref(&signature).to_vec())
    }

    fn key_uri(&self) -> &str {
        &self.key_uri
    }
}

impl fmt::Debug for DidKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DidKeypair")
            .field("did", &self.did)
            .field("key_uri", &self.key_uri)
            .finish_non_exhaustive()
    }
}

/// Key identifier hash: Blake2b-256 over the tagged public key bytes.
fn key_hash(public: &sr25519::Public) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update([PUBLIC_VERIFICATION_KEY, SR25519]);
    hasher.update(AsRef::<[u8]>::as_ref(public));
    hasher.finalize().into()
}
