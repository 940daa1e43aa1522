//! Unified error type.

use std::fmt;

/// The error type returned by groq-relay's fallible operations.
///
/// Upstream application-level errors (4xx/5xx from the proxied API) are not
/// `Error`s — they pass through as ordinary responses. This type surfaces
/// infrastructure failures: binding a port, constructing an outbound URL, or
/// a transport-level failure while talking to the upstream.
#[derive(Debug)]
pub enum Error {
    /// Socket-level failure (bind, accept).
    Io(std::io::Error),
    /// Building an `http` request or response failed.
    Http(http::Error),
    /// The outbound URL could not be constructed from the inbound request.
    Url(url::ParseError),
    /// The outbound fetch failed at the transport level (DNS, connect, TLS,
    /// mid-stream disconnect). Never retried.
    Upstream(reqwest::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Url(e) => write!(f, "url: {e}"),
            Self::Upstream(e) => write!(f, "upstream: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Url(e) => Some(e),
            Self::Upstream(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self::Http(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Url(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e)
    }
}
