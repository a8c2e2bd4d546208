//! HTTP surface for Veracity.
//!
//! JSON over HTTP: the fact and leaderboard endpoints are public; the answer
//! and username endpoints derive identity from a bearer token resolved
//! against the store's auth service. Every failure is converted to a JSON
//! `{message}` body with an appropriate status; nothing is process-fatal.

mod error;
mod routes;

pub use error::WebError;
pub use routes::{AppState, create_router};
