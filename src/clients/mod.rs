pub mod health_client;
pub mod prediction_client;
pub mod roadmap_client;

pub use health_client::HealthClient;
pub use prediction_client::PredictionClient;
pub use roadmap_client::RoadmapClient;

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Joins a configured base URL and a route
pub(crate) fn endpoint_url(base_url: &str, route: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

/// Reads a response body as JSON.
///
/// Non-success statuses become [`ApiError::BadStatus`], carrying the
/// service's `error` message when the body has one.
pub(crate) async fn read_json(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<Value, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::request_failed(endpoint, e))?;

    debug!("{} -> HTTP {} ({} bytes)", endpoint, status.as_u16(), body.len());

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));
        return Err(ApiError::BadStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::json_parse_failed(endpoint, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_once() {
        assert_eq!(endpoint_url("http://h:5000", "predict"), "http://h:5000/predict");
        assert_eq!(endpoint_url("http://h:5000/", "/chat"), "http://h:5000/chat");
        assert_eq!(endpoint_url("http://h/api/", ""), "http://h/api/");
    }
}
