//! Roadmap (text-generation) service client
//!
//! Wraps `POST {base}/chat`.

use tracing::{debug, info};

use crate::clients::{endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{RoadmapRequest, RoadmapResponse};
use crate::utils::logging::truncate_text;

/// Roadmap API client
#[derive(Debug, Clone)]
pub struct RoadmapClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RoadmapClient {
    /// Creates a client for the configured chat host
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(reqwest::Client::new(), config.chat_base())
    }

    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: endpoint_url(base_url, "chat"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Requests advice for one role.
    ///
    /// # Returns
    /// The raw advice text; a reply without a non-empty `advice` is an error.
    pub async fn advise(&self, request: &RoadmapRequest) -> Result<String, ApiError> {
        debug!(
            "POST {} role={} prompt={}",
            self.endpoint,
            request.role,
            truncate_text(&request.prompt, 80)
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(&self.endpoint, e))?;

        let body = read_json(response, &self.endpoint).await?;
        let reply: RoadmapResponse = serde_json::from_value(body)
            .map_err(|_| ApiError::unexpected_shape(&self.endpoint, "a JSON object"))?;

        let advice = extract_advice(reply, &self.endpoint)?;
        info!("✓ Roadmap for {} received ({} chars)", request.role, advice.len());
        Ok(advice)
    }
}

fn extract_advice(reply: RoadmapResponse, endpoint: &str) -> Result<String, ApiError> {
    match reply.advice {
        Some(advice) if !advice.trim().is_empty() => Ok(advice),
        _ => match reply.error {
            Some(message) => Err(ApiError::BadStatus {
                endpoint: endpoint.to_string(),
                status: 200,
                message: Some(message),
            }),
            None => Err(ApiError::unexpected_shape(endpoint, "a non-empty advice field")),
        },
    }
}
