//! Client for the external facts API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::FactError;

/// A single entry in the facts API response.
#[derive(Debug, Deserialize)]
struct FactRecord {
    #[serde(default)]
    fact: String,
}

/// Client for an API-Ninjas-style facts endpoint.
pub struct FactSource {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FactSource {
    /// Create a new client for the given facts API base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch one factual sentence.
    ///
    /// Fails with [`FactError::UpstreamFact`] if the source is unreachable,
    /// returns a non-success status, or yields no usable sentence. No retries
    /// are performed.
    pub async fn fetch_fact(&self) -> Result<String, FactError> {
        let url = format!("{}/v1/facts", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| FactError::UpstreamFact(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FactError::UpstreamFact(format!(
                "fact source returned {}",
                response.status()
            )));
        }

        let records: Vec<FactRecord> = response
            .json()
            .await
            .map_err(|e| FactError::UpstreamFact(format!("invalid response body: {}", e)))?;

        let fact = records
            .into_iter()
            .next()
            .map(|r| r.fact)
            .unwrap_or_default();
        let fact = fact.trim();

        if fact.is_empty() {
            return Err(FactError::UpstreamFact(
                "no fact in response".to_string(),
            ));
        }

        debug!(len = fact.len(), "fetched fact");
        Ok(fact.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_fact_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"fact": "Honey never spoils."}
            ])))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let fact = source.fetch_fact().await.unwrap();

        assert_eq!(fact, "Honey never spoils.");
    }

    #[tokio::test]
    async fn test_fetch_fact_uses_first_entry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"fact": "First fact."},
                {"fact": "Second fact."}
            ])))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let fact = source.fetch_fact().await.unwrap();

        assert_eq!(fact, "First fact.");
    }

    #[tokio::test]
    async fn test_fetch_fact_upstream_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let result = source.fetch_fact().await;

        assert!(matches!(result, Err(FactError::UpstreamFact(_))));
    }

    #[tokio::test]
    async fn test_fetch_fact_empty_array() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let result = source.fetch_fact().await;

        assert!(matches!(result, Err(FactError::UpstreamFact(_))));
    }

    #[tokio::test]
    async fn test_fetch_fact_blank_fact() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"fact": "   "}
            ])))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let result = source.fetch_fact().await;

        assert!(matches!(result, Err(FactError::UpstreamFact(_))));
    }

    #[tokio::test]
    async fn test_fetch_fact_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let source = FactSource::new(mock_server.uri(), "test-key");
        let result = source.fetch_fact().await;

        assert!(matches!(result, Err(FactError::UpstreamFact(_))));
    }
}
