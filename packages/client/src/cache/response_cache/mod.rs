//! In-memory response store
//!
//! The functionality is organized into logical modules:
//!
//! - `core`: `ResponseCache` struct, construction and size information
//! - `operations`: lookup, put and remove
//! - `eviction`: LRU eviction, the expiry sweep and the background sweeper
//!
//! Storage is a sharded concurrent map, so lookups and writes only contend on
//! the shard holding their key and no lock is ever held across a network
//! round trip.

pub mod core;
pub mod eviction;
pub mod operations;

pub use self::core::ResponseCache;
