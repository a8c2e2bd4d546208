//! Client for the generative falsification call.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::FactError;

/// Minimum length for an accepted falsified candidate.
const MIN_CANDIDATE_CHARS: usize = 11;

/// Request body for a `generateContent` call.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Response body for a `generateContent` call.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Client for a Gemini-style generative endpoint that rewrites a fact to be
/// false but plausible.
pub struct Falsifier {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl Falsifier {
    /// Create a new falsifier against the given generative API base URL.
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
            model: "gemini-1.5-flash".to_string(),
        }
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Produce a falsified rendering of `original`.
    ///
    /// Exactly one generation attempt is made. Fails with
    /// [`FactError::Falsification`] on any network error or when the
    /// candidate is rejected (empty, too short, or case-insensitively
    /// identical to the original).
    pub async fn falsify(&self, original: &str) -> Result<String, FactError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(original),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| FactError::Falsification(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FactError::Falsification(format!(
                "generative API returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FactError::Falsification(format!("invalid response body: {}", e)))?;

        let raw = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        let candidate = sanitize_candidate(&raw, original)?;
        debug!(len = candidate.len(), "accepted falsified candidate");
        Ok(candidate)
    }
}

/// Build the falsification prompt for a fact.
fn build_prompt(original: &str) -> String {
    format!(
        "Take the following fact and make it false, but keep it believable \
         and grammatically correct. Output only the modified fact, nothing \
         else. Fact: \"{}\"",
        original
    )
}

/// Validate and normalize a raw generated candidate.
///
/// Trims whitespace, strips a single pair of surrounding quote characters if
/// present, then rejects candidates that are empty, shorter than
/// [`MIN_CANDIDATE_CHARS`], or case-insensitively identical to the original.
fn sanitize_candidate(raw: &str, original: &str) -> Result<String, FactError> {
    let mut candidate = raw.trim();

    if candidate.len() >= 2 && candidate.starts_with('"') && candidate.ends_with('"') {
        candidate = candidate[1..candidate.len() - 1].trim();
    }

    if candidate.is_empty() {
        return Err(FactError::Falsification("empty candidate".to_string()));
    }

    if candidate.chars().count() < MIN_CANDIDATE_CHARS {
        return Err(FactError::Falsification(format!(
            "candidate too short ({} chars)",
            candidate.chars().count()
        )));
    }

    if candidate.to_lowercase() == original.to_lowercase() {
        return Err(FactError::Falsification(
            "candidate identical to original".to_string(),
        ));
    }

    Ok(candidate.to_string())
}
