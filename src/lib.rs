//! # groq-relay
//!
//! A minimal streaming reverse proxy for the Groq API.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! A client calls this service as if it were the API itself — same paths,
//! same bodies, same `authorization` header. The relay rewrites the URL onto
//! the real upstream (`https://api.groq.com/openai/v1`), forwards only the
//! headers on an explicit allow-list, and streams the answer straight back
//! with permissive CORS headers attached. The upstream origin stays hidden
//! and configurable server-side; the client sees one stable, CORS-friendly
//! endpoint.
//!
//! What the relay deliberately does **not** do:
//!
//! - **Auth** — the `authorization` header passes through verbatim, nothing else
//! - **Retries / caching / rate limiting** — one inbound request, one
//!   outbound fetch, pass or fail
//! - **API semantics** — bodies are opaque byte streams, never parsed
//!
//! Three behaviors, in priority order, exactly one per request:
//!
//! | Request | Response |
//! |---|---|
//! | `OPTIONS *` | 200, empty body, the three CORS headers |
//! | `/` | 200, informational HTML page |
//! | anything else | streamed passthrough to the upstream |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use groq_relay::{Proxy, ProxyConfig, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let proxy = Proxy::new(ProxyConfig::default()).expect("client setup");
//!
//!     Server::bind("0.0.0.0:3000").serve(proxy).await.unwrap();
//! }
//! ```
//!
//! The handler itself has no opinion about where requests come from: anything
//! that can produce an `http::Request` can call [`Proxy::handle`] directly —
//! which is exactly how the test suite exercises it, with a recording
//! [`Upstream`] in place of the network.

mod body;
mod config;
mod error;
mod handler;
mod headers;
mod server;
mod upstream;

pub use body::{Body, BoxError, empty, from_stream, full};
pub use config::{CorsPolicy, GROQ_UPSTREAM, ProxyConfig, RESERVED_QUERY_KEY};
pub use error::Error;
pub use handler::Proxy;
pub use headers::{HeaderRule, pick_headers};
pub use server::Server;
pub use upstream::{HttpsUpstream, OutboundRequest, Upstream, UpstreamFuture};
