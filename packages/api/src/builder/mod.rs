//! Fluent request builder
//!
//! - `core`: `RequestBuilder`, body state markers and `ContentType`
//! - `headers`: header setters
//! - `auth`: authentication headers
//! - `body`: request bodies
//! - `methods`: terminal methods that execute the request

pub mod auth;
pub mod body;
pub mod core;
pub mod headers;
pub mod methods;

pub use self::core::*;
pub use headers::*;
