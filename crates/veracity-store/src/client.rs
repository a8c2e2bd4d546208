//! HTTP plumbing shared by all store operations.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// PostgREST error body.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Client for a Supabase-style store: PostgREST rows under `/rest/v1`,
/// auth endpoints under `/auth/v1`.
pub struct StoreClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    /// Create a new client for the given store URL and public API key.
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

    /// GET against a `/rest/v1` path with the store's own credentials.
    pub(crate) fn rest_get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/rest/v1{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// POST against a `/rest/v1` path with the store's own credentials.
    pub(crate) fn rest_post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}/rest/v1{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// PATCH against a `/rest/v1` path with the store's own credentials.
    pub(crate) fn rest_patch(&self, path: &str) -> RequestBuilder {
        self.http
            .patch(format!("{}/rest/v1{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// GET against an `/auth/v1` path carrying a caller's bearer token.
    pub(crate) fn auth_get(&self, path: &str, bearer_token: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/auth/v1{}", self.base_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(bearer_token)
    }

    /// Parse a store response, mapping failures onto [`StoreError`].
    ///
    /// A unique violation (Postgres `23505`, surfaced by PostgREST as HTTP
    /// 409) becomes [`StoreError::DuplicateUsername`] — `username` is the
    /// only unique nullable column in the schema.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, StoreError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            if let Ok(pg) = serde_json::from_str::<PostgrestError>(&text) {
                if pg.code == UNIQUE_VIOLATION || status == reqwest::StatusCode::CONFLICT {
                    return Err(StoreError::DuplicateUsername);
                }
                return Err(StoreError::Store {
                    status: status.as_u16(),
                    message: pg.message,
                });
            }

            if status == reqwest::StatusCode::CONFLICT {
                return Err(StoreError::DuplicateUsername);
            }

            return Err(StoreError::Store {
                status: status.as_u16(),
                message: text,
            });
        }

        response.json().await.map_err(StoreError::Http)
    }
}
