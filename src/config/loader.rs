//! Configuration loading from the environment.

use std::env;

use thiserror::Error;
use url::Url;

use crate::config::schema::{TxdConfig, ENV_BASE_URL, ENV_KEY_URI, ENV_SEED_PHRASE};
use crate::txd::poller::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required values are unset.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    /// The service base URL could not be parsed.
    #[error("invalid {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Values that take precedence over the environment (e.g. CLI flags).
/// May carry the seed phrase, so deliberately not `Debug`.
#[derive(Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub seed_phrase: Option<String>,
    pub key_uri: Option<String>,
}

/// Load configuration from the process environment.
pub fn from_env() -> Result<TxdConfig, ConfigError> {
    load(Overrides::default())
}

/// Load configuration, preferring explicit overrides over the environment.
///
/// Collects every missing value before failing so a broken deployment
/// reports the whole problem at once. Empty strings count as unset, matching
/// how the deployment scripts treat blank variables.
pub fn load(overrides: Overrides) -> Result<TxdConfig, ConfigError> {
    // A .env file is a convenience for local runs; its absence is fine.
    let _ = dotenvy::dotenv();

    let mut missing = Vec::new();
    let base_url_raw = resolve(overrides.base_url, ENV_BASE_URL, &mut missing);
    let seed_phrase = resolve(overrides.seed_phrase, ENV_SEED_PHRASE, &mut missing);
    let key_uri = overrides
        .key_uri
        .filter(|v| !v.is_empty())
        .or_else(|| env::var(ENV_KEY_URI).ok().filter(|v| !v.is_empty()));

    if !missing.is_empty() {
        return Err(ConfigError::MissingVars(missing));
    }

    let base_url = Url::parse(&base_url_raw).map_err(|source| ConfigError::InvalidUrl {
        var: ENV_BASE_URL,
        source,
    })?;

    Ok(TxdConfig {
        base_url,
        seed_phrase,
        key_uri,
        poll_interval: DEFAULT_POLL_INTERVAL,
        poll_timeout: DEFAULT_POLL_TIMEOUT,
    })
}

fn resolve(override_value: Option<String>, var: &'static str, missing: &mut Vec<String>) -> String {
    if let Some(value) = override_value.filter(|v| !v.is_empty()) {
        return value;
    }
    match env::var(var) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            missing.push(var.to_string());
            String::new()
        }
    }
}
