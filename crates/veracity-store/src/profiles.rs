//! Profile access: the streak ledger and username assignment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::{Profile, StoreClient, StoreError, StreakUpdate};

/// Minimum trimmed username length.
const MIN_USERNAME_CHARS: usize = 3;

/// Columns fetched for a profile row.
const PROFILE_COLUMNS: &str = "id,username,current_streak,highest_streak,updated_at";

/// Compute the next streak values for an answer.
///
/// A correct answer extends the current streak and raises the highest streak
/// to match if surpassed; a wrong answer resets the current streak and leaves
/// the highest untouched. The increment saturates at `u32::MAX`. For any
/// `prior_highest >= prior_current`, the result maintains
/// `highest >= current` and never lowers `highest`.
pub fn next_streaks(was_correct: bool, prior_current: u32, prior_highest: u32) -> (u32, u32) {
    if was_correct {
        let new_current = prior_current.saturating_add(1);
        (new_current, new_current.max(prior_highest))
    } else {
        (0, prior_highest)
    }
}

/// Upsert body for a streak write.
#[derive(Debug, Serialize)]
struct StreakRow {
    id: Uuid,
    current_streak: u32,
    highest_streak: u32,
    updated_at: DateTime<Utc>,
}

/// Update body for a username write.
#[derive(Debug, Serialize)]
struct UsernameRow<'a> {
    username: &'a str,
    updated_at: DateTime<Utc>,
}

impl StoreClient {
    /// Fetch a user's profile row, or `None` if it does not exist yet
    /// (the row is created by the store on first write, or by a signup
    /// trigger).
    pub async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        let response = self
            .rest_get("/profiles")
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", PROFILE_COLUMNS.to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<Profile> = self.handle_response(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Apply one answer to a user's streaks and persist the result.
    ///
    /// This is a read-then-write with caller-held prior values, not an atomic
    /// increment: two concurrent answers from the same identity can lose an
    /// update. The store's upsert (insert-if-absent, else overwrite by id) is
    /// the only write primitive available here, so the window is accepted and
    /// the returned representation is treated as the authoritative values.
    pub async fn update_streak(
        &self,
        user_id: Uuid,
        was_correct: bool,
        prior_current: u32,
        prior_highest: u32,
    ) -> Result<StreakUpdate, StoreError> {
        let (current_streak, highest_streak) =
            next_streaks(was_correct, prior_current, prior_highest);

        let row = StreakRow {
            id: user_id,
            current_streak,
            highest_streak,
            updated_at: Utc::now(),
        };

        let response = self
            .rest_post("/profiles")
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .query(&[("select", "current_streak,highest_streak")])
            .json(&row)
            .send()
            .await?;

        let rows: Vec<StreakUpdate> = self.handle_response(response).await?;
        let update = rows.into_iter().next().ok_or_else(|| {
            StoreError::InvalidResponse("upsert returned no representation".to_string())
        })?;

        debug!(
            user_id = %user_id,
            current = update.current_streak,
            highest = update.highest_streak,
            "persisted streak update"
        );
        Ok(update)
    }

    /// Set a user's leaderboard username.
    ///
    /// Rejects candidates shorter than three trimmed characters before any
    /// network call. Setting the already-stored value is a successful no-op
    /// with no write. A uniqueness violation surfaces as
    /// [`StoreError::DuplicateUsername`]. Returns the stored value.
    pub async fn set_username(
        &self,
        user_id: Uuid,
        candidate: &str,
    ) -> Result<String, StoreError> {
        let trimmed = candidate.trim();
        if trimmed.chars().count() < MIN_USERNAME_CHARS {
            return Err(StoreError::Validation(format!(
                "username must be at least {} characters",
                MIN_USERNAME_CHARS
            )));
        }

        if let Some(profile) = self.fetch_profile(user_id).await? {
            if profile.username.as_deref() == Some(trimmed) {
                return Ok(trimmed.to_string());
            }
        }

        let row = UsernameRow {
            username: trimmed,
            updated_at: Utc::now(),
        };

        let response = self
            .rest_patch("/profiles")
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", "username".to_string()),
            ])
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        #[derive(serde::Deserialize)]
        struct UsernameResult {
            username: String,
        }

        let rows: Vec<UsernameResult> = self.handle_response(response).await?;
        let stored = rows.into_iter().next().ok_or_else(|| {
            StoreError::InvalidResponse("no profile row to update".to_string())
        })?;

        Ok(stored.username)
    }
}
