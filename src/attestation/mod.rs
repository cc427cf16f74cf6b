//! Compliance attestation: protocol types and service clients.
//!
//! # Responsibilities
//! - Wire request/response schema, aliases included
//! - Typed approvals and the grant/deny verdict
//! - Two interchangeable clients: direct HTTP and SDK-delegated

pub mod client;
pub mod delegated;
pub mod types;

pub use client::{AttestationClient, HttpAttestationClient};
pub use delegated::SdkAttestationClient;
pub use types::{
    Attestation, AttestationError, AttestationRequest, AttestationResponse, AttestationResult,
    ComplianceVerdict,
};
