//! Prediction service
//!
//! Turns one `/predict` call into a [`PredictionOutcome`]; no failure escapes
//! as an error, so the rest of the questionnaire stays usable.

use tracing::warn;

use crate::clients::PredictionClient;
use crate::config::Config;
use crate::models::PredictionRequest;
use crate::workflow::PredictionOutcome;

/// Prediction service
#[derive(Debug, Clone)]
pub struct PredictionService {
    client: PredictionClient,
}

impl PredictionService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: PredictionClient::new(config),
        }
    }

    pub fn with_client(client: PredictionClient) -> Self {
        Self { client }
    }

    /// Issues the request once and classifies the answer
    pub async fn predict(&self, request: &PredictionRequest) -> PredictionOutcome {
        match self.client.predict(request).await {
            Ok(predictions) if predictions.is_empty() => PredictionOutcome::NoMatches,
            Ok(predictions) => PredictionOutcome::Matches(predictions),
            Err(e) => {
                warn!("⚠️ Prediction request failed: {}", e);
                PredictionOutcome::Failed(e.to_string())
            }
        }
    }
}
