//! Orchestration of fact fetch and falsification into a presented statement.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{FactError, FactSource, Falsifier};

/// A statement ready to show to the player, with its truth label.
///
/// Invariants: `original_fact` is always the unmodified source fact, and
/// `presented_fact` equals `original_fact` exactly when
/// `is_presented_fact_true` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedFact {
    /// The statement shown to the player.
    pub presented_fact: String,
    /// Whether the presented statement is true.
    pub is_presented_fact_true: bool,
    /// The unmodified source fact.
    pub original_fact: String,
}

impl PresentedFact {
    /// Present the original fact unmodified.
    fn truthful(original: String) -> Self {
        Self {
            presented_fact: original.clone(),
            is_presented_fact_true: true,
            original_fact: original,
        }
    }

    /// Present a falsified rendering alongside the original.
    fn falsified(candidate: String, original: String) -> Self {
        Self {
            presented_fact: candidate,
            is_presented_fact_true: false,
            original_fact: original,
        }
    }
}

/// Produces presented facts by combining a [`FactSource`] and a [`Falsifier`].
pub struct FactPresenter {
    source: FactSource,
    falsifier: Falsifier,
    falsify_probability: f64,
}

impl FactPresenter {
    /// Create a presenter with the default 50% falsification odds.
    pub fn new(source: FactSource, falsifier: Falsifier) -> Self {
        Self {
            source,
            falsifier,
            falsify_probability: 0.5,
        }
    }

    /// Override the falsification probability (must be within `0.0..=1.0`).
    pub fn with_falsify_probability(mut self, probability: f64) -> Self {
        self.falsify_probability = probability;
        self
    }

    /// Produce one presented fact.
    ///
    /// Fetches a fact (failures propagate as [`FactError::UpstreamFact`]),
    /// then with `falsify_probability` attempts a single falsification. Any
    /// falsification failure silently downgrades to presenting the true
    /// original: a failed falsification must never fail the pipeline.
    pub async fn present(&self) -> Result<PresentedFact, FactError> {
        let original = self.source.fetch_fact().await?;

        let should_falsify = rand::thread_rng().gen_bool(self.falsify_probability);
        if !should_falsify {
            return Ok(PresentedFact::truthful(original));
        }

        match self.falsifier.falsify(&original).await {
            Ok(candidate) => Ok(PresentedFact::falsified(candidate, original)),
            Err(e) => {
                warn!(error = %e, "falsification failed, presenting original");
                Ok(PresentedFact::truthful(original))
            }
        }
    }
}

impl std::fmt::Debug for FactPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactPresenter")
            .field("falsify_probability", &self.falsify_probability)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ORIGINAL: &str = "Honey never spoils.";

    async fn mock_fact_source(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"fact": ORIGINAL}
            ])))
            .mount(server)
            .await;
    }

    async fn mock_falsifier(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    fn generate_body(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": text}]}}
            ]
        }))
    }

    fn presenter(server: &MockServer, probability: f64) -> FactPresenter {
        FactPresenter::new(
            FactSource::new(server.uri(), "facts-key"),
            Falsifier::new(server.uri(), "gemini-key"),
        )
        .with_falsify_probability(probability)
    }

    #[tokio::test]
    async fn test_no_falsify_branch_presents_original() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;

        let presented = presenter(&server, 0.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, ORIGINAL);
        assert_eq!(presented.original_fact, ORIGINAL);
        assert!(presented.is_presented_fact_true);
    }

    #[tokio::test]
    async fn test_falsify_branch_presents_candidate() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;
        mock_falsifier(&server, generate_body("Honey spoils within a year.")).await;

        let presented = presenter(&server, 1.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, "Honey spoils within a year.");
        assert_eq!(presented.original_fact, ORIGINAL);
        assert!(!presented.is_presented_fact_true);
        assert_ne!(
            presented.presented_fact.to_lowercase(),
            presented.original_fact.to_lowercase()
        );
    }

    #[tokio::test]
    async fn test_falsifier_network_failure_falls_back_to_original() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;
        mock_falsifier(&server, ResponseTemplate::new(500)).await;

        let presented = presenter(&server, 1.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, ORIGINAL);
        assert!(presented.is_presented_fact_true);
    }

    #[tokio::test]
    async fn test_falsifier_empty_candidate_falls_back_to_original() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;
        mock_falsifier(&server, generate_body("")).await;

        let presented = presenter(&server, 1.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, ORIGINAL);
        assert!(presented.is_presented_fact_true);
    }

    #[tokio::test]
    async fn test_falsifier_short_candidate_falls_back_to_original() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;
        mock_falsifier(&server, generate_body("Too short.")).await;

        let presented = presenter(&server, 1.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, ORIGINAL);
        assert!(presented.is_presented_fact_true);
    }

    #[tokio::test]
    async fn test_falsifier_identical_candidate_falls_back_to_original() {
        let server = MockServer::start().await;
        mock_fact_source(&server).await;
        mock_falsifier(&server, generate_body("HONEY NEVER SPOILS.")).await;

        let presented = presenter(&server, 1.0).present().await.unwrap();

        assert_eq!(presented.presented_fact, ORIGINAL);
        assert!(presented.is_presented_fact_true);
    }

    #[tokio::test]
    async fn test_fact_source_failure_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/facts"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = presenter(&server, 0.0).present().await;

        assert!(matches!(result, Err(FactError::UpstreamFact(_))));
    }

    #[test]
    fn test_presented_fact_wire_format() {
        let presented = PresentedFact {
            presented_fact: "A".to_string(),
            is_presented_fact_true: false,
            original_fact: "B".to_string(),
        };

        let json = serde_json::to_value(&presented).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "presentedFact": "A",
                "isPresentedFactTrue": false,
                "originalFact": "B"
            })
        );
    }
}
