use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a request that cannot be keyed or addressed.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a transport failure.
pub fn request<E: Into<BoxError>>(e: E, url: url::Url) -> Error {
    Error::new(Kind::Request).with(e.into()).with_url(url)
}

/// Creates an `Error` for a connector failure.
pub fn connect<E: Into<BoxError>>(e: E, url: url::Url) -> Error {
    Error::new(Kind::Connect).with(e.into()).with_url(url)
}

/// Creates an `Error` for a body error.
pub fn body<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Body).with(e.into())
}

/// Creates an `Error` for a decode error.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates an `Error` for a rejected cache configuration.
pub fn configuration<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config).with(e.into())
}
