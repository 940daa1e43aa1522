//! The request handler — the entire proxy lives in this module.
//!
//! Three branches, checked in order, exactly one taken per request:
//!
//! 1. **Preflight** — `OPTIONS` anything: answer 200 with the CORS headers
//!    and nothing else. No upstream call.
//! 2. **Landing** — `GET /` (any method on `/`, in fact): a static HTML page
//!    saying what this service is. No upstream call.
//! 3. **Proxy** — everything else: rebuild the URL against the upstream
//!    base, filter the request headers down to the allow-list, stream the
//!    body through, then return the upstream's status and body with CORS
//!    headers overlaid and `content-encoding` dropped.
//!
//! The handler holds no mutable state; every value lives for one invocation.

use std::sync::Arc;

use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::body::{self, Body};
use crate::config::ProxyConfig;
use crate::error::Error;
use crate::headers::pick_headers;
use crate::upstream::{HttpsUpstream, OutboundRequest, Upstream};

const LANDING_PAGE: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
  <meta charset=\"UTF-8\">\n\
  <title>Groq API relay</title>\n\
</head>\n\
<body>\n\
  <h1>Groq API relay</h1>\n\
  <p>A streaming reverse proxy in front of the Groq API. Point your client\n\
  at this origin and call the usual API paths; requests are forwarded\n\
  upstream with permissive CORS on the way back.</p>\n\
</body>\n\
</html>\n";

/// The proxy: one [`ProxyConfig`] plus one [`Upstream`], shared by every
/// in-flight request.
///
/// The hosting layer (the bundled [`Server`](crate::Server), or anything
/// else that can hand over an `http::Request`) calls [`Proxy::handle`] once
/// per inbound request. Tests call it directly.
pub struct Proxy {
    config: ProxyConfig,
    upstream: Arc<dyn Upstream>,
}

impl Proxy {
    /// A proxy backed by the real HTTPS client.
    pub fn new(config: ProxyConfig) -> Result<Self, Error> {
        Ok(Self::with_upstream(config, HttpsUpstream::new()?))
    }

    /// A proxy backed by any [`Upstream`] implementation — the seam tests
    /// use to observe outbound requests without a network.
    pub fn with_upstream(config: ProxyConfig, upstream: impl Upstream) -> Self {
        Self {
            config,
            upstream: Arc::new(upstream),
        }
    }

    /// Handles one inbound request.
    ///
    /// Errors are not caught here: a failed upstream fetch surfaces as
    /// `Err`, and the hosting layer decides what generic failure response to
    /// produce. Upstream 4xx/5xx are not errors — they pass through.
    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, Error> {
        if req.method() == Method::OPTIONS {
            return Ok(self.preflight());
        }
        if req.uri().path() == "/" {
            return Ok(self.landing());
        }
        self.forward(req).await
    }

    /// CORS preflight: 200, empty body, exactly the CORS header set.
    fn preflight(&self) -> Response<Body> {
        let mut response = Response::new(body::empty());
        *response.headers_mut() = self.config.cors().header_map();
        response
    }

    /// The informational root page.
    fn landing(&self) -> Response<Body> {
        let mut response = Response::new(body::full(LANDING_PAGE));
        *response.headers_mut() = self.config.cors().header_map();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        response
    }

    /// The passthrough branch: one outbound fetch, streamed both ways.
    async fn forward(&self, req: Request<Body>) -> Result<Response<Body>, Error> {
        let (parts, inbound_body) = req.into_parts();

        let url = self
            .config
            .upstream_url(parts.uri.path(), parts.uri.query());
        let headers = pick_headers(&parts.headers, self.config.forward_rules());
        let outbound_body = has_body(&parts.headers).then_some(inbound_body);

        debug!(method = %parts.method, url = %url, "forwarding upstream");

        let upstream_response = self
            .upstream
            .send(OutboundRequest {
                method: parts.method,
                url,
                headers,
                body: outbound_body,
            })
            .await?;

        let (mut parts, upstream_body) = upstream_response.into_parts();
        parts.headers = self.finalize_headers(parts.headers);
        Ok(Response::from_parts(parts, upstream_body))
    }

    /// CORS base, overlaid by every upstream header (upstream wins), minus
    /// `content-encoding`.
    ///
    /// The upstream never sees an `accept-encoding` from us — it is not on
    /// the allow-list — so any `content-encoding` it volunteers does not
    /// describe the bytes we forward. All values for the name are removed.
    fn finalize_headers(&self, upstream: HeaderMap) -> HeaderMap {
        let mut headers = self.config.cors().header_map();
        headers.extend(upstream);
        headers.remove(CONTENT_ENCODING);
        headers
    }

    /// The generic failure response the hosting layer returns when
    /// [`handle`](Proxy::handle) errors. CORS headers included, like every
    /// other response.
    pub fn bad_gateway(&self) -> Response<Body> {
        let mut response = Response::new(body::empty());
        *response.status_mut() = StatusCode::BAD_GATEWAY;
        *response.headers_mut() = self.config.cors().header_map();
        response
    }
}

/// Does the inbound request carry a body worth forwarding?
///
/// Decided from the framing headers rather than by polling the stream, so a
/// bare `GET` produces an outbound request with no body at all instead of a
/// zero-length chunked upload.
fn has_body(headers: &HeaderMap) -> bool {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|len| len != "0");
    declared || headers.contains_key(TRANSFER_ENCODING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_get_has_no_body() {
        assert!(!has_body(&HeaderMap::new()));
    }

    #[test]
    fn content_length_zero_has_no_body() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert!(!has_body(&headers));
    }

    #[test]
    fn content_length_and_chunked_both_count() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("42"));
        assert!(has_body(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        assert!(has_body(&headers));
    }
}
