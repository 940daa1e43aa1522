//! Minimal groq-relay deployment — Groq defaults, one listener.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl -X OPTIONS -i http://localhost:3000/chat/completions
//!   curl http://localhost:3000/chat/completions \
//!        -H 'content-type: application/json' \
//!        -H "authorization: Bearer $GROQ_API_KEY" \
//!        -d '{"model":"llama-3.3-70b-versatile","messages":[{"role":"user","content":"hi"}]}'

use groq_relay::{Proxy, ProxyConfig, Server};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Upstream, allow-list and CORS policy are fixed at startup. The
    // defaults are the Groq API with content-type + authorization forwarded.
    let proxy = Proxy::new(ProxyConfig::default()).expect("failed to build HTTPS client");

    Server::bind("0.0.0.0:3000")
        .serve(proxy)
        .await
        .expect("server error");
}
