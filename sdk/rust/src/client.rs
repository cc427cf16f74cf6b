use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A proposed transaction submitted for compliance verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    /// Hook contract the pre-check call is addressed to.
    pub to: String,
    /// Account that will send the swap.
    pub from: String,
    /// 0x-prefixed hex call data of the pre-check payload.
    pub data: String,
    /// Native value carried by the swap, as a decimal string.
    pub value: String,
}

/// Verdict returned by the attestation service.
///
/// Canonical field names are snake_case; aliases cover the camelCase
/// spelling and the singular `signature` array used by an older service
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
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

pub struct AttesterClient {
    client: Client,
    service_url: String,
    api_key: String,
}

impl AttesterClient {
    pub fn new(service_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Like [`AttesterClient::new`] but with a request timeout.
    pub fn with_timeout(
        service_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            service_url: service_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Submit a proposed transaction for compliance verification.
    pub async fn verify(
        &self,
        req: &VerifyRequest,
    ) -> Result<VerifyResponse, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self
            .client
            .post(&self.service_url)
            .header("x-api-key", self.api_key.as_str())
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!(
                "Attestation service returned status {}: {}",
                status, text
            )
            .into());
        }

        match serde_json::from_str::<VerifyResponse>(&text) {
            Ok(verify_resp) => Ok(verify_resp),
            Err(e) => Err(format!("Malformed attestation response: {} (body: {})", e, text).into()),
        }
    }
}
