//! Client for the Yandex Telemost conferencing API.
//!
//! The client is a stateless proxy: it validates inputs locally, issues
//! one HTTP call per operation and returns the provider's JSON
//! verbatim. Meeting state is never cached, the remote is the source of
//! truth.

pub mod client;
pub mod error;
pub mod models;
pub mod snapshot;

pub use client::TelemostClient;
pub use error::TelemostError;
pub use models::{Cohost, LiveStream, validate_meeting_data};
