//! Compliance-gated swap transactor library.
//!
//! Builds, gates, and submits pool swaps that must first pass an
//! off-chain compliance check: encode the pre-check payload, exchange it
//! for a signed attestation, embed the approval in router call data, then
//! sign and broadcast.

pub mod attestation;
pub mod blockchain;
pub mod codec;
pub mod config;
pub mod error;
pub mod swap;

pub use config::TransactorConfig;
pub use error::{TransactorError, TransactorResult};
pub use swap::{PreparedSwap, SwapBuilder};
