//! Session resolution against the store's auth service.

use tracing::debug;

use crate::{AuthenticatedUser, StoreClient, StoreError};

impl StoreClient {
    /// Resolve a caller's bearer token to an authenticated user.
    ///
    /// This is the single session-resolution call at the request boundary;
    /// everything downstream receives the resolved identity as a parameter
    /// and never reads ambient session state. An expired or invalid token
    /// yields [`StoreError::Unauthorized`].
    pub async fn resolve_user(&self, access_token: &str) -> Result<AuthenticatedUser, StoreError> {
        let response = self.auth_get("/user", access_token).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(StoreError::Unauthorized(if text.is_empty() {
                "invalid session token".to_string()
            } else {
                text
            }));
        }

        let user: AuthenticatedUser = self.handle_response(response).await?;
        debug!(user_id = %user.id, "resolved session");
        Ok(user)
    }
}
