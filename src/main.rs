//! Compliance-gated swap transactor.
//!
//! # Pipeline
//! ```text
//! config file + CLI flags
//!     → validation
//!     → SwapBuilder   (pre-check → attestation → hook data → call data)
//!     → Submitter     (nonce sync, gas checks, sign, broadcast)
//!     → receipt polling
//! ```
//!
//! The signing key comes from `TRANSACTOR_PRIVATE_KEY`; it never appears
//! in the config file or on the command line.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swap_transactor::attestation::{HttpAttestationClient, SdkAttestationClient};
use swap_transactor::blockchain::{BlockchainClient, Submitter, Wallet};
use swap_transactor::config::{parse_config, validate_config, TransactorConfig};
use swap_transactor::swap::{CallConvention, PreparedSwap, SwapBuilder, SwapDirection, SwapMode};

#[derive(Parser, Debug)]
#[command(name = "swap-transactor")]
#[command(about = "Builds, gates, and submits compliance-checked pool swaps", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Attestation service URL
    #[arg(long)]
    attester_url: Option<String>,

    /// Attestation service API key
    #[arg(long)]
    api_key: Option<String>,

    /// JSON-RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    /// Router contract address
    #[arg(long)]
    router: Option<String>,

    /// Swap amount in wei (decimal)
    #[arg(long)]
    amount: Option<String>,

    /// Trade direction: zero-for-one or one-for-zero
    #[arg(long)]
    direction: Option<SwapDirection>,

    /// Amount semantics: exact-in or exact-out
    #[arg(long)]
    mode: Option<SwapMode>,

    /// Router call convention: direct or batch
    #[arg(long)]
    convention: Option<CallConvention>,

    /// Build and print the call data without submitting
    #[arg(long)]
    dry_run: bool,
}

fn apply_overrides(config: &mut TransactorConfig, cli: &Cli) {
    if let Some(url) = &cli.attester_url {
        config.attester.url = url.clone();
    }
    if let Some(key) = &cli.api_key {
        config.attester.api_key = key.clone();
    }
    if let Some(url) = &cli.rpc_url {
        config.chain.rpc_url = url.clone();
    }
    if let Some(router) = &cli.router {
        config.swap.router = router.clone();
    }
    if let Some(amount) = &cli.amount {
        config.swap.amount = amount.clone();
    }
    if let Some(direction) = cli.direction {
        config.swap.direction = direction;
    }
    if let Some(mode) = cli.mode {
        config.swap.mode = mode;
    }
    if let Some(convention) = cli.convention {
        config.swap.convention = convention;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swap_transactor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => parse_config(path)?,
        None => TransactorConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(field = %error.field, "{}", error.message);
        }
        return Err(format!("configuration invalid ({} problems)", errors.len()).into());
    }

    tracing::info!(
        environment = %config.environment,
        attester_url = %config.attester.url,
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        convention = ?config.swap.convention,
        "swap-transactor starting"
    );

    let pool = config.pool.to_pool_key()?;
    let router = config.swap.router_address()?;
    let intent = config.swap.to_intent()?;
    let value = config.swap.value_wei()?;
    let builder = SwapBuilder::new(pool, router, config.swap.convention);

    // The sender's identity goes into the pre-check, so the wallet is
    // needed even on dry runs.
    let wallet = Wallet::from_env(config.chain.chain_id)?;
    let caller = wallet.address();

    let timeout = Duration::from_secs(config.attester.timeout_secs);
    let prepared: PreparedSwap = if config.attester.use_sdk {
        let client = SdkAttestationClient::with_timeout(
            &config.attester.url,
            &config.attester.api_key,
            timeout,
        )?;
        builder.build(&client, caller, &intent, value).await?
    } else {
        let client = HttpAttestationClient::with_timeout(
            &config.attester.url,
            &config.attester.api_key,
            timeout,
        )?;
        builder.build(&client, caller, &intent, value).await?
    };

    tracing::info!(
        to = %prepared.to,
        calldata_bytes = prepared.calldata.len(),
        value = %prepared.value,
        "Swap call prepared"
    );

    if cli.dry_run {
        println!("to:       {}", prepared.to);
        println!("value:    {}", prepared.value);
        println!("calldata: {}", prepared.calldata);
        return Ok(());
    }

    let client = BlockchainClient::new(config.chain.clone()).await?;
    match client.get_balance(caller).await {
        Ok(balance) => tracing::info!(address = %caller, balance = %balance, "Sender funded"),
        Err(e) => tracing::warn!(error = %e, "Could not read sender balance"),
    }

    let submitter = Submitter::new(client, wallet);
    let tx_hash = submitter.submit_swap(&prepared).await?;
    let receipt = submitter.await_receipt(tx_hash).await?;

    tracing::info!(
        tx_hash = %tx_hash,
        block = receipt.block_number.unwrap_or_default(),
        gas_used = receipt.gas_used,
        "Swap confirmed"
    );

    Ok(())
}
