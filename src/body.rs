//! Streaming body plumbing.
//!
//! Both directions of the proxy move bytes as streams: the inbound request
//! body is handed to the upstream client while it is still arriving, and the
//! upstream response body is handed to the client while it is still arriving.
//! Nothing in this crate ever collects a body into memory, so memory use is
//! bounded by transport buffering, not by payload size.
//!
//! Everything is erased to a single [`Body`] alias so the handler, the server
//! and test code all speak one body type. Constructing a test request is just
//! `full(b"...")`; an empty one is `empty()`.

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::Frame;

/// Boxed error type used by body streams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The one body type used throughout the crate.
///
/// `UnsyncBoxBody` rather than `BoxBody`: the upstream client's response
/// stream is `Send` but not `Sync`, and nothing here needs `Sync`.
pub type Body = UnsyncBoxBody<Bytes, BoxError>;

/// A body with no bytes. Used for preflight responses and bodiless requests.
pub fn empty() -> Body {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// A body holding a single in-memory chunk. Used for the landing page and
/// for constructing requests in tests.
pub fn full(data: impl Into<Bytes>) -> Body {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Wraps a fallible byte stream (e.g. an upstream response) as a [`Body`].
///
/// Chunks flow through one at a time; dropping the returned body drops the
/// underlying stream, which is how cancellation propagates to the upstream
/// connection.
pub fn from_stream<S, E>(stream: S) -> Body
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<BoxError> + 'static,
{
    StreamBody::new(stream.map_ok(Frame::data).map_err(Into::into)).boxed_unsync()
}
