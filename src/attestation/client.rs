//! Attestation service access.
//!
//! # Responsibilities
//! - Define the verdict-source seam the builder is generic over
//! - Speak the service's HTTP protocol: JSON body, `x-api-key` header
//!
//! # Design Decisions
//! - Non-2xx responses are surfaced with their body instead of being
//!   parsed; error bodies do not follow the verdict schema
//! - The response body is read as text first so parse failures can quote
//!   what the service actually sent

use std::future::Future;
use std::time::Duration;

use crate::attestation::types::{
    AttestationError, AttestationRequest, AttestationResponse, AttestationResult,
    ComplianceVerdict,
};

/// A source of compliance verdicts.
///
/// Implemented by the HTTP client, the SDK-delegated client, and
/// in-process stubs in tests.
pub trait AttestationClient {
    fn request(
        &self,
        request: &AttestationRequest,
    ) -> impl Future<Output = AttestationResult<ComplianceVerdict>> + Send;
}

/// Talks to the attestation service directly over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAttestationClient {
    http: reqwest::Client,
    service_url: String,
    api_key: String,
}

impl HttpAttestationClient {
    pub fn new(service_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            service_url: service_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Like [`HttpAttestationClient::new`] but with a request timeout.
    pub fn with_timeout(
        service_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            service_url: service_url.into(),
            api_key: api_key.into(),
        })
    }
}

impl AttestationClient for HttpAttestationClient {
    async fn request(
        &self,
        request: &AttestationRequest,
    ) -> AttestationResult<ComplianceVerdict> {
        tracing::debug!(
            url = %self.service_url,
            to = %request.to,
            "Posting attestation request"
        );

        let response = self
            .http
            .post(&self.service_url)
            .header("x-api-key", self.api_key.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AttestationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AttestationResponse =
            serde_json::from_str(&body).map_err(|e| AttestationError::Parse {
                reason: e.to_string(),
                body: body.clone(),
            })?;
        parsed.into_verdict()
    }
}
