//! HTTP request/response model, header helpers and URL normalization

pub mod headers;
pub mod request;
pub mod response;
pub mod url;

pub use headers::*;
pub use request::HttpRequest;
pub use response::{CACHE_ORIGIN, CacheServe, HttpResponse, ResponseOrigin, cache_origin_url};
pub use self::url::{normalize_url, resolve_url};
