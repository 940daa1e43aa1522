//! The outbound network seam.
//!
//! # Why a trait
//!
//! The handler must be callable without a network: tests construct a request,
//! call [`Proxy::handle`](crate::Proxy::handle), and inspect exactly what
//! would have been sent upstream. So the one side effect the handler performs
//! — the outbound fetch — lives behind [`Upstream`], and the production
//! implementation ([`HttpsUpstream`]) is just one implementor among any
//! number of recording fakes.
//!
//! The trait returns a boxed future ([`UpstreamFuture`]) so implementors with
//! different concrete future types can be stored uniformly behind
//! `Arc<dyn Upstream>`. One allocation and one vtable call per proxied
//! request — negligible next to the network round-trip.

use std::future::Future;
use std::pin::Pin;

use http::{HeaderMap, Method};
use http_body_util::BodyExt;
use url::Url;

use crate::body::{self, Body};
use crate::error::Error;

// ── Contract ──────────────────────────────────────────────────────────────────

/// A fully-built outbound request: rewritten URL, filtered headers, and the
/// inbound body stream (when there is one).
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// `None` when the inbound request carried no body (e.g. `GET`).
    pub body: Option<Body>,
}

/// A heap-allocated, type-erased future resolving to the upstream response.
pub type UpstreamFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<Body>, Error>> + Send + 'static>>;

/// The seam between the handler and the real network.
pub trait Upstream: Send + Sync + 'static {
    /// Performs the outbound fetch. Exactly one call per proxied request;
    /// never retried. Dropping the returned future (client went away) must
    /// abort the outbound transfer — ownership takes care of that for any
    /// implementation that holds its connection inside the future.
    fn send(&self, req: OutboundRequest) -> UpstreamFuture;
}

// ── Production implementation ─────────────────────────────────────────────────

/// [`Upstream`] backed by a shared HTTPS client.
///
/// Redirect following is disabled: a 3xx from the upstream is a response like
/// any other and passes through verbatim. No compression features are enabled
/// either, so response bytes arrive — and are forwarded — exactly as the
/// upstream sent them.
pub struct HttpsUpstream {
    client: reqwest::Client,
}

impl HttpsUpstream {
    /// Builds the shared client. Call once at startup; the client pools
    /// connections internally and is cheap to clone per request.
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

impl Upstream for HttpsUpstream {
    fn send(&self, req: OutboundRequest) -> UpstreamFuture {
        let client = self.client.clone();
        Box::pin(async move {
            let mut outbound = client.request(req.method, req.url).headers(req.headers);

            // Stream the inbound body through as it arrives; the upload can
            // start before the client has finished sending it to us.
            if let Some(inbound) = req.body {
                outbound = outbound.body(reqwest::Body::wrap_stream(inbound.into_data_stream()));
            }

            let upstream = outbound.send().await?;

            let mut response = http::Response::builder().status(upstream.status());
            if let Some(headers) = response.headers_mut() {
                *headers = upstream.headers().clone();
            }

            // Hand the response body over as a stream too — it is pulled
            // chunk by chunk while the client downloads it.
            Ok(response.body(body::from_stream(upstream.bytes_stream()))?)
        })
    }
}
