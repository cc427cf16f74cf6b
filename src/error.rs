//! Top-level error taxonomy for the swap pipeline.
//!
//! Subsystem errors keep their own types; this enum is what crosses the
//! pipeline boundary. Compliance denial gets its own variant because it
//! is a verdict, not a malfunction: callers routinely branch on it.

use thiserror::Error;

use crate::attestation::AttestationError;
use crate::blockchain::BlockchainError;
use crate::codec::CodecError;

/// Any failure the swap pipeline can surface.
#[derive(Debug, Error)]
pub enum TransactorError {
    /// The attestation service rejected the swap, or returned an
    /// approval too malformed to embed.
    #[error("compliance denied: {0}")]
    ComplianceDenied(String),

    #[error(transparent)]
    Attestation(#[from] AttestationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

pub type TransactorResult<T> = Result<T, TransactorError>;
