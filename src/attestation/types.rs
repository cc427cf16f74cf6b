//! Attestation wire and domain types.
//!
//! The wire layer mirrors what the service actually sends: snake_case
//! canonical names with aliases for the camelCase spelling and the
//! singular `signature` array of an older service generation. The domain
//! layer is fully parsed: real addresses, real byte strings, a 256-bit
//! expiry.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::AbiValue;

/// Errors raised while obtaining a verdict.
#[derive(Debug, Error)]
pub enum AttestationError {
    #[error("attestation transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("attestation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("attestation response unreadable: {reason} (got: {body})")]
    Parse { reason: String, body: String },

    #[error("attester sdk failure: {0}")]
    Sdk(String),
}

pub type AttestationResult<T> = Result<T, AttestationError>;

/// Request body posted to the attestation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationRequest {
    /// Hook contract the pre-check call is addressed to.
    pub to: String,
    /// Account that will send the swap.
    pub from: String,
    /// 0x-prefixed hex pre-check payload.
    pub data: String,
    /// Native value carried by the swap, as a decimal string.
    pub value: String,
}

/// Verdict body as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttestationResponse {
    #[serde(alias = "isCompliant")]
    pub is_compliant: bool,
    #[serde(default, alias = "taskId")]
    pub task_id: String,
    #[serde(default)]
    pub signers: Vec<String>,
    #[serde(default, alias = "signature")]
    pub signatures: Vec<String>,
    #[serde(default, alias = "expiryBlock")]
    pub expiry_block: u64,
}

impl AttestationResponse {
    /// Parse the wire body into a typed verdict.
    ///
    /// Denials skip field parsing entirely: a denial body often carries
    /// nothing beyond the flag and a task id.
    pub fn into_verdict(self) -> AttestationResult<ComplianceVerdict> {
        if !self.is_compliant {
            return Ok(ComplianceVerdict::Denied {
                task_id: self.task_id,
            });
        }

        let signers = self
            .signers
            .iter()
            .map(|raw| {
                raw.parse::<Address>().map_err(|e| AttestationError::Parse {
                    reason: format!("bad signer address: {e}"),
                    body: raw.clone(),
                })
            })
            .collect::<AttestationResult<Vec<_>>>()?;

        let signatures = self
            .signatures
            .iter()
            .map(|raw| {
                raw.parse::<Bytes>().map_err(|e| AttestationError::Parse {
                    reason: format!("bad signature hex: {e}"),
                    body: raw.clone(),
                })
            })
            .collect::<AttestationResult<Vec<_>>>()?;

        Ok(ComplianceVerdict::Granted(Attestation {
            task_id: self.task_id,
            expiry_block: U256::from(self.expiry_block),
            signers,
            signatures,
        }))
    }
}

/// A granted compliance approval, ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Attestation {
    pub task_id: String,
    pub expiry_block: U256,
    pub signers: Vec<Address>,
    pub signatures: Vec<Bytes>,
}

impl Attestation {
    /// ABI form of the approval: `(string,uint256,address[],bytes[])`.
    pub fn to_abi_value(&self) -> AbiValue {
        AbiValue::Tuple(vec![
            AbiValue::String(self.task_id.clone()),
            AbiValue::Uint(self.expiry_block, 256),
            AbiValue::Array(self.signers.iter().copied().map(AbiValue::Address).collect()),
            AbiValue::Array(
                self.signatures
                    .iter()
                    .map(|sig| AbiValue::Bytes(sig.to_vec()))
                    .collect(),
            ),
        ])
    }
}

/// Outcome of one verification round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplianceVerdict {
    Granted(Attestation),
    Denied { task_id: String },
}
