//! Prediction service client
//!
//! Wraps `POST {base}/predict`. One attempt per call; no retry and no
//! client-side timeout.

use serde_json::Value;
use tracing::{debug, info};

use crate::clients::{endpoint_url, read_json};
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{CareerPrediction, PredictionRequest};

/// Prediction API client
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    /// Creates a client for the configured prediction host
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(reqwest::Client::new(), config.predict_base())
    }

    /// Creates a client for an explicit base URL, sharing `http`
    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: endpoint_url(base_url, "predict"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one prediction request.
    ///
    /// # Returns
    /// The ranked list in service order; an empty list is a valid answer.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<CareerPrediction>, ApiError> {
        debug!("POST {} marks={:?}", self.endpoint, request.marks);

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(&self.endpoint, e))?;

        let body = read_json(response, &self.endpoint).await?;
        let predictions = parse_predictions(body, &self.endpoint)?;

        info!("✓ {} returned {} predictions", self.endpoint, predictions.len());
        Ok(predictions)
    }
}

/// Checks the response is an array of `{role, prob, algo?}`.
///
/// An object carrying an `error` string is a service-side failure even with
/// a success status; its message is kept.
fn parse_predictions(body: Value, endpoint: &str) -> Result<Vec<CareerPrediction>, ApiError> {
    const EXPECTED: &str = "an array of {role, prob} objects";

    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(ApiError::BadStatus {
            endpoint: endpoint.to_string(),
            status: 200,
            message: Some(message.to_string()),
        });
    }
    if !body.is_array() {
        return Err(ApiError::unexpected_shape(endpoint, EXPECTED));
    }
    serde_json::from_value(body).map_err(|e| {
        debug!("prediction element rejected: {}", e);
        ApiError::unexpected_shape(endpoint, EXPECTED)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_predictions_keeps_order() {
        let parsed = parse_predictions(
            json!([
                { "role": "Data Analyst", "prob": 82 },
                { "role": "ML Engineer", "prob": 77, "algo": "KNN: Cluster Beta" }
            ]),
            "/predict",
        )
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].role, "Data Analyst");
        assert_eq!(parsed[1].algo.as_deref(), Some("KNN: Cluster Beta"));
    }

    #[test]
    fn test_parse_predictions_empty_is_ok() {
        assert!(parse_predictions(json!([]), "/predict").unwrap().is_empty());
    }

    #[test]
    fn test_parse_predictions_rejects_other_shapes() {
        for body in [
            json!({ "status": "online" }),
            json!("ok"),
            json!([{ "role": "Data Analyst" }]),
            json!([{ "role": 3, "prob": 10 }]),
        ] {
            assert!(matches!(
                parse_predictions(body, "/predict"),
                Err(ApiError::UnexpectedShape { .. })
            ));
        }
    }

    #[test]
    fn test_error_body_keeps_message() {
        let err = parse_predictions(json!({ "error": "careers.json not found" }), "/predict")
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::BadStatus { status: 200, message: Some(ref m), .. } if m == "careers.json not found"
        ));
        assert!(err.to_string().contains("careers.json not found"));
    }

    #[test]
    fn test_endpoint_from_config() {
        let config = Config {
            api_base_url: "http://localhost:5000/".to_string(),
            ..Config::default()
        };
        assert_eq!(PredictionClient::new(&config).endpoint(), "http://localhost:5000/predict");
    }
}
