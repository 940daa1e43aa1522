//! Process-wide fixed configuration.
//!
//! Everything the proxy needs to know is decided once, at startup, and never
//! mutated again: the upstream base URL, the query key the hosting layer is
//! allowed to inject for its own routing, the request-header allow-list, and
//! the CORS policy stamped onto every response. [`ProxyConfig`] is an
//! immutable value — share it, clone it, there is no lifecycle beyond the
//! process.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use http::{HeaderMap, HeaderValue};
use url::Url;
use url::form_urlencoded;

use crate::error::Error;
use crate::headers::HeaderRule;

/// The upstream origin and base path every proxied request resolves against.
pub const GROQ_UPSTREAM: &str = "https://api.groq.com/openai/v1";

/// Query key some hosting environments use to encode the matched route.
/// Stripped before forwarding — it must never leak upstream.
pub const RESERVED_QUERY_KEY: &str = "_path";

// ── CorsPolicy ────────────────────────────────────────────────────────────────

/// The CORS headers attached to every response the proxy returns.
#[derive(Clone, Debug)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// `*` / `*` / `*` — any origin, any method, any header.
    pub fn permissive() -> Self {
        let star = HeaderValue::from_static("*");
        Self {
            allow_origin: star.clone(),
            allow_methods: star.clone(),
            allow_headers: star,
        }
    }

    /// The three CORS headers as a fresh header map, ready to be overlaid
    /// with upstream headers.
    pub(crate) fn header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(3);
        map.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        map.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        map.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        map
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}

// ── ProxyConfig ───────────────────────────────────────────────────────────────

/// Immutable proxy configuration, constructed once at startup.
///
/// # Example
///
/// ```rust
/// use groq_relay::ProxyConfig;
///
/// // Groq defaults: https://api.groq.com/openai/v1, `_path` stripped,
/// // content-type + authorization forwarded, permissive CORS.
/// let config = ProxyConfig::default();
///
/// // Or point at a different upstream:
/// let config = ProxyConfig::new("https://api.example.com/v2").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    upstream: Url,
    reserved_key: String,
    forward_rules: Vec<HeaderRule>,
    cors: CorsPolicy,
}

impl ProxyConfig {
    /// Configuration targeting `upstream` (origin plus base path), with the
    /// default allow-list, reserved key and CORS policy.
    pub fn new(upstream: &str) -> Result<Self, Error> {
        Ok(Self {
            upstream: Url::parse(upstream)?,
            reserved_key: RESERVED_QUERY_KEY.to_owned(),
            forward_rules: vec![
                HeaderRule::Exact("content-type"),
                HeaderRule::Exact("authorization"),
            ],
            cors: CorsPolicy::permissive(),
        })
    }

    /// Replaces the CORS policy.
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Replaces the request-header allow-list.
    pub fn with_forward_rules(mut self, rules: Vec<HeaderRule>) -> Self {
        self.forward_rules = rules;
        self
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    pub fn forward_rules(&self) -> &[HeaderRule] {
        &self.forward_rules
    }

    /// Builds the outbound URL for an inbound path and query string.
    ///
    /// The inbound path is appended verbatim to the upstream base path, so
    /// `/chat/completions` against the Groq default becomes
    /// `https://api.groq.com/openai/v1/chat/completions`.
    ///
    /// Query pairs are carried over in their original order, duplicate keys
    /// and all, minus every pair whose key is the reserved routing key.
    /// Pairs are decoded and re-serialized on the way through, so
    /// percent-encoding may be normalized (`%20` comes out as `+`, as a
    /// browser's `URLSearchParams` would write it); the decoded keys and
    /// values are unchanged.
    pub(crate) fn upstream_url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.upstream.clone();

        let base = self.upstream.path().trim_end_matches('/');
        url.set_path(&format!("{base}{path}"));

        let kept: Vec<(String, String)> = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .filter(|(key, _)| key.as_ref() != self.reserved_key)
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        if !kept.is_empty() {
            url.query_pairs_mut().extend_pairs(kept);
        }

        url
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::new(GROQ_UPSTREAM).expect("default upstream URL is valid")
    }
}
