//! Service status probe (`GET {base}/`)

use serde::Deserialize;
use tracing::{info, warn};

use crate::clients::{endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct StatusReply {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Health probe client
#[derive(Debug, Clone)]
pub struct HealthClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HealthClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(reqwest::Client::new(), &config.api_base_url)
    }

    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: endpoint_url(base_url, ""),
        }
    }

    /// Returns the reported status (`"online"` when healthy)
    pub async fn status(&self) -> Result<String, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(&self.endpoint, e))?;

        let body = read_json(response, &self.endpoint).await?;
        let reply: StatusReply = serde_json::from_value(body)
            .map_err(|_| ApiError::unexpected_shape(&self.endpoint, "an object with a status"))?;

        if let Some(message) = &reply.message {
            info!("🩺 {} ({})", reply.status, message);
        }
        Ok(reply.status)
    }

    /// Probes once and logs the result; never fails the caller
    pub async fn probe(&self) -> bool {
        match self.status().await {
            Ok(status) if status == "online" => {
                info!("✓ Analysis service online at {}", self.endpoint);
                true
            }
            Ok(status) => {
                warn!("⚠️ Analysis service reports status '{}'", status);
                false
            }
            Err(e) => {
                warn!("⚠️ Analysis service unreachable: {}", e);
                false
            }
        }
    }
}
