//! Client for the external profile store (Supabase/PostgREST).
//!
//! All durable state lives in one `profiles` table owned by the external
//! store: `id` (primary key, equals the auth identity), `username` (unique
//! when set), `current_streak`, `highest_streak`, `updated_at`. This crate
//! provides:
//! - the streak ledger (read-modify-write upsert of a player's streaks)
//! - the read-only leaderboard projection
//! - username assignment with its uniqueness and length rules
//! - session resolution from a caller's bearer token to a user id
//!
//! Nothing is cached: every call goes to the store.

mod client;
mod error;
mod leaderboard;
mod profiles;
mod session;
mod types;

pub use client::StoreClient;
pub use error::StoreError;
pub use leaderboard::DEFAULT_LEADERBOARD_LIMIT;
pub use profiles::next_streaks;
pub use types::{AuthenticatedUser, LeaderboardRow, Profile, StreakUpdate};
