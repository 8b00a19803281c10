//! Configuration schema definitions.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Environment variable naming the dispatch service base URL.
pub const ENV_BASE_URL: &str = "BASE_URI_TXD";

/// Environment variable naming the DID seed phrase.
pub const ENV_SEED_PHRASE: &str = "SECRET_SEED_PHRASE";

/// Environment variable naming an explicit DID key URI.
pub const ENV_KEY_URI: &str = "DID_KEY_URI";

/// Validated runtime configuration for the client.
///
/// Built once at startup and passed by reference to the components that need
/// it; nothing reads the environment after this point.
#[derive(Clone)]
pub struct TxdConfig {
    /// Base URL of the dispatch service.
    pub base_url: Url,

    /// Mnemonic seed phrase the DID authentication key derives from.
    pub seed_phrase: String,

    /// Explicit DID key URI; derived from the seed when absent.
    pub key_uri: Option<String>,

    /// Wait between status polls.
    pub poll_interval: Duration,

    /// Ceiling on a whole polling session.
    pub poll_timeout: Duration,
}

impl fmt::Debug for TxdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxdConfig")
            .field("base_url", &self.base_url.as_str())
            .field("seed_phrase", &"<redacted>")
            .field("key_uri", &self.key_uri)
            .field("poll_interval", &self.poll_interval)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
