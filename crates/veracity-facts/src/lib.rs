//! Fact sourcing and falsification pipeline for Veracity.
//!
//! This crate provides the three pieces behind `/api/get-fact`:
//! - [`FactSource`]: fetches one true trivia fact from an external facts API
//! - [`Falsifier`]: rewrites a fact to be false but plausible via a
//!   generative-text API
//! - [`FactPresenter`]: orchestrates both into a [`PresentedFact`] with a
//!   truth label, falling back to the true fact whenever falsification fails

mod error;
mod falsifier;
mod presenter;
mod source;

pub use error::FactError;
pub use falsifier::Falsifier;
pub use presenter::{FactPresenter, PresentedFact};
pub use source::FactSource;
