//! Submission CLI.
//!
//! Submits a hex-encoded call to the transaction dispatch service, signed by
//! the DID derived from the configured seed phrase, then waits for the
//! submission to finalize.
//!
//! ```text
//! seed phrase ──► identity (derive sr25519 auth key, DID, key URI)
//! call data   ──► txd::client (authenticated POST → submission id)
//!                 txd::poller (authenticated GETs until terminal/timeout)
//! ```

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use txd_client::config::{loader, Overrides};
use txd_client::lifecycle::signals;
use txd_client::{observability, DidKeypair, Shutdown, StatusPoller, SubmissionStatus, TxdClient};

/// Default dispatch service endpoint (staging).
const DEFAULT_ENDPOINT: &str = "https://txd-stg.trusted-entity.io";

/// Default call data: system.remark("Hello World!").
const DEFAULT_CALL_DATA: &str = "0x00002c68656c6c6f20776f726c64";

#[derive(Parser)]
#[command(name = "txd-submit")]
#[command(about = "Submit a DID-signed call to the transaction dispatch service", long_about = None)]
struct Cli {
    /// Endpoint of the dispatch service.
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seed phrase of the client DID account (falls back to SECRET_SEED_PHRASE).
    #[arg(short, long)]
    seed: Option<String>,

    /// Hex-encoded call data to submit.
    #[arg(short, long, default_value = DEFAULT_CALL_DATA)]
    tx: String,

    /// Seconds to wait between status polls.
    #[arg(long, default_value_t = 1)]
    poll_interval_secs: u64,

    /// Seconds before giving up on a non-terminal submission.
    #[arg(long, default_value_t = 120)]
    poll_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    observability::logging::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Submission did not complete");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = loader::load(Overrides {
        base_url: Some(cli.endpoint),
        seed_phrase: cli.seed,
        key_uri: None,
    })?;
    config.poll_interval = Duration::from_secs(cli.poll_interval_secs);
    config.poll_timeout = Duration::from_secs(cli.poll_timeout_secs);

    let call_data = validate_call_data(&cli.tx)?;

    tracing::info!(endpoint = %config.base_url, "Configuration loaded");

    let mut keypair = DidKeypair::from_seed_phrase(&config.seed_phrase)?;
    if let Some(key_uri) = &config.key_uri {
        keypair = keypair.with_key_uri(key_uri.clone());
    }

    let shutdown = Shutdown::new();
    signals::spawn_ctrl_c_handler(shutdown.clone());

    let client = TxdClient::new(config.base_url.clone(), Arc::new(keypair));
    let id = client.submit(call_data).await?;

    let poller = StatusPoller::new(client)
        .with_interval(config.poll_interval)
        .with_timeout(config.poll_timeout);

    match poller.poll_until_terminal(&id, shutdown.subscribe()).await? {
        SubmissionStatus::Finalized => {
            tracing::info!(id = %id, "Transaction finalized");
            Ok(())
        }
        status => Err(format!("submission {id} ended in terminal status {status}").into()),
    }
}

/// Reject call data that is not 0x-prefixed hex before anything is sent.
fn validate_call_data(tx: &str) -> Result<&str, Box<dyn std::error::Error>> {
    let hex_part = tx
        .strip_prefix("0x")
        .ok_or("call data must be 0x-prefixed hex")?;
    hex::decode(hex_part).map_err(|e| format!("call data is not valid hex: {e}"))?;
    Ok(tx)
}
