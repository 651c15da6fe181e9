//! Caching client
//!
//! - `core`: `CachingClient` and the per-request state machine
//! - `configuration`: `ClientConfig`
//! - `stats`: request outcome counters

pub mod configuration;
pub mod core;
pub mod stats;

pub use configuration::{ClientConfig, DEFAULT_USER_AGENT};
pub use self::core::CachingClient;
pub use stats::{ClientStats, ClientStatsSnapshot};
