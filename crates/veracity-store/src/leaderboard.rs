//! Read-only leaderboard projection.

use crate::{LeaderboardRow, StoreClient, StoreError};

/// Default number of leaderboard entries.
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

impl StoreClient {
    /// Fetch the top streaks: profiles with a username set, descending by
    /// `highest_streak`, at most `limit` rows.
    ///
    /// Ties fall in the store's natural order; no secondary sort key is
    /// applied, so tie order is not deterministic. Never partially succeeds:
    /// any store failure fails the whole query.
    pub async fn top_streaks(&self, limit: u32) -> Result<Vec<LeaderboardRow>, StoreError> {
        let response = self
            .rest_get("/profiles")
            .query(&[
                ("select", "username,highest_streak".to_string()),
                ("username", "not.is.null".to_string()),
                ("order", "highest_streak.desc".to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
