//! Shared mock services for integration testing.
//!
//! Both mocks bind an ephemeral port and run until the test process
//! exits. The attestation mock answers every POST with one canned body;
//! the JSON-RPC mock answers the handful of methods the pipeline uses,
//! with a scripted receipt sequence and a broadcast counter.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Transaction hash every mock broadcast reports back.
pub const TX_HASH: &str = "0x11221122112211221122112211221122112211221122112211221122112211aa";

/// Request counter for the mock attester.
#[derive(Clone, Default)]
pub struct AttesterStats {
    requests: Arc<AtomicUsize>,
}

impl AttesterStats {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct AttesterState {
    stats: AttesterStats,
    status: u16,
    body: Arc<Value>,
}

async fn attester_handler(State(state): State<AttesterState>) -> (StatusCode, Json<Value>) {
    state.stats.requests.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::from_u16(state.status).unwrap(),
        Json((*state.body).clone()),
    )
}

/// Start a mock attestation service answering every POST to `/task`
/// with the given status and body.
pub async fn start_mock_attester(status: u16, body: Value) -> (SocketAddr, AttesterStats) {
    let stats = AttesterStats::default();
    let state = AttesterState {
        stats: stats.clone(),
        status,
        body: Arc::new(body),
    };

    let app = Router::new()
        .route("/task", post(attester_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, stats)
}

/// Broadcast counter for the mock RPC node.
#[derive(Clone, Default)]
pub struct RpcStats {
    send_raw: Arc<AtomicUsize>,
}

impl RpcStats {
    pub fn broadcasts(&self) -> usize {
        self.send_raw.load(Ordering::SeqCst)
    }
}

struct ReceiptScript {
    steps: Vec<Value>,
    cursor: usize,
}

impl ReceiptScript {
    /// Next scripted answer; past the end the last step repeats, and an
    /// empty script always answers null.
    fn next(&mut self) -> Value {
        if self.steps.is_empty() {
            return Value::Null;
        }
        let i = self.cursor.min(self.steps.len() - 1);
        self.cursor += 1;
        self.steps[i].clone()
    }
}

#[derive(Clone)]
struct RpcState {
    stats: RpcStats,
    receipts: Arc<Mutex<ReceiptScript>>,
}

async fn rpc_handler(State(state): State<RpcState>, Json(request): Json<Value>) -> Json<Value> {
    let method = request["method"].as_str().unwrap_or_default();
    let id = request["id"].clone();

    let result = match method {
        // Anvil's chain id, 31337
        "eth_chainId" => json!("0x7a69"),
        "eth_blockNumber" => json!("0x10"),
        "eth_getTransactionCount" => json!("0x0"),
        // 1 gwei
        "eth_gasPrice" => json!("0x3b9aca00"),
        // 1 ether
        "eth_getBalance" => json!("0xde0b6b3a7640000"),
        "eth_sendRawTransaction" => {
            state.stats.send_raw.fetch_add(1, Ordering::SeqCst);
            json!(TX_HASH)
        }
        "eth_getTransactionReceipt" => state.receipts.lock().unwrap().next(),
        _ => Value::Null,
    };

    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

/// Start a mock JSON-RPC node. `receipts` scripts the successive
/// answers to `eth_getTransactionReceipt`.
pub async fn start_mock_rpc(receipts: Vec<Value>) -> (SocketAddr, RpcStats) {
    let stats = RpcStats::default();
    let state = RpcState {
        stats: stats.clone(),
        receipts: Arc::new(Mutex::new(ReceiptScript {
            steps: receipts,
            cursor: 0,
        })),
    };

    let app = Router::new().route("/", post(rpc_handler)).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, stats)
}

/// A legacy-type receipt in the node's wire shape. `status` is "0x1" or
/// "0x0"; `block_number` a hex quantity.
pub fn receipt_json(status: &str, block_number: &str) -> Value {
    json!({
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": "0x7a3f0c9b7a3f0c9b7a3f0c9b7a3f0c9b7a3f0c9b7a3f0c9b7a3f0c9b7a3f0c9b",
        "blockNumber": block_number,
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee",
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x0",
        "status": status,
        "effectiveGasPrice": "0x3b9aca00"
    })
}
