//! Store-facing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `profiles` table.
///
/// Invariant after any completed update: `highest_streak >= current_streak`,
/// and `highest_streak` never decreases across the profile's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Primary key, equal to the external auth identity.
    pub id: Uuid,
    /// Leaderboard name; unique when set, absent until the player picks one.
    pub username: Option<String>,
    /// Consecutive correct answers; resets to 0 on a wrong answer.
    pub current_streak: u32,
    /// Best streak ever reached.
    pub highest_streak: u32,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

/// The authoritative streak values returned by a ledger update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub highest_streak: u32,
}

/// One leaderboard entry: a named profile's best streak.
///
/// Rows are ordered descending by `highest_streak`; ties fall in the store's
/// natural order, which is not deterministic (no secondary sort key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub username: String,
    pub highest_streak: u32,
}

/// Identity resolved from a session token at the request boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}
