//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts and read failover)
//!     → submitter.rs (nonce sync, gas checks, broadcast, receipt poll)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod submitter;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use submitter::Submitter;
pub use types::{BlockchainError, BlockchainResult, ChainConfig, ChainId};
pub use wallet::{Wallet, PRIVATE_KEY_ENV_VAR};
