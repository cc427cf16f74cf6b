//! Verdicts through the bundled attester SDK.
//!
//! Delegates the HTTP round trip to `attester-sdk` and converts its wire
//! types into the pipeline's verdict model. Useful where deployments
//! already standardize on the SDK for service access.

use std::time::Duration;

use attester_sdk::{AttesterClient, VerifyRequest, VerifyResponse};

use crate::attestation::client::AttestationClient;
use crate::attestation::types::{
    AttestationError, AttestationRequest, AttestationResponse, AttestationResult,
    ComplianceVerdict,
};

/// [`AttestationClient`] backed by the SDK's `AttesterClient`.
pub struct SdkAttestationClient {
    inner: AttesterClient,
}

impl SdkAttestationClient {
    pub fn new(service_url: &str, api_key: &str) -> Self {
        Self {
            inner: AttesterClient::new(service_url, api_key),
        }
    }

    /// Like [`SdkAttestationClient::new`] but with a request timeout.
    pub fn with_timeout(
        service_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            inner: AttesterClient::with_timeout(service_url, api_key, timeout)?,
        })
    }
}

impl AttestationClient for SdkAttestationClient {
    async fn request(
        &self,
        request: &AttestationRequest,
    ) -> AttestationResult<ComplianceVerdict> {
        let wire = VerifyRequest {
            to: request.to.clone(),
            from: request.from.clone(),
            data: request.data.clone(),
            value: request.value.clone(),
        };

        let response = self
            .inner
            .verify(&wire)
            .await
            .map_err(|e| AttestationError::Sdk(e.to_string()))?;

        unify(response).into_verdict()
    }
}

/// The SDK's response carries the same fields under its own type.
fn unify(response: VerifyResponse) -> AttestationResponse {
    AttestationResponse {
        is_compliant: response.is_compliant,
        task_id: response.task_id,
        signers: response.signers,
        signatures: response.signatures,
        expiry_block: response.expiry_block,
    }
}
