//! Local stand-in for the attestation service.
//!
//! Grants every request with a canned single-signer attestation, or
//! denies everything with `--deny`. Useful for development against a
//! local chain where no real verifier runs.

use axum::{extract::State, routing::post, Json, Router};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use swap_transactor::attestation::AttestationRequest;

#[derive(Parser, Debug)]
#[command(name = "mock-attester")]
#[command(
    about = "Always-grant (or always-deny) attestation service for local development",
    long_about = None
)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8787")]
    bind: String,

    /// Deny every request instead of granting
    #[arg(long)]
    deny: bool,
}

#[derive(Clone)]
struct MockState {
    deny: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_attester=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let state = MockState { deny: cli.deny };

    let app = Router::new()
        .route("/task", post(verify_task))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        deny = cli.deny,
        "mock-attester listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

async fn verify_task(
    State(state): State<MockState>,
    Json(request): Json<AttestationRequest>,
) -> Json<serde_json::Value> {
    let task_id = Uuid::new_v4().to_string();
    tracing::info!(
        task_id = %task_id,
        to = %request.to,
        from = %request.from,
        data_bytes = request.data.len().saturating_sub(2) / 2,
        deny = state.deny,
        "Verification request"
    );

    if state.deny {
        return Json(serde_json::json!({
            "is_compliant": false,
            "task_id": task_id,
        }));
    }

    // One canned signer (Anvil account 0) and a structurally valid
    // 65-byte signature. Real verification happens on-chain against the
    // hook's registered signer set, which a local hook is deployed to
    // accept.
    Json(serde_json::json!({
        "is_compliant": true,
        "task_id": task_id,
        "signers": ["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"],
        "signatures": [format!("0x{}", "ab".repeat(65))],
        "expiry_block": 99_999_999u64,
    }))
}
