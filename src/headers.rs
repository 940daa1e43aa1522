//! Request-header allow-list.
//!
//! Inbound requests arrive carrying whatever the browser felt like attaching
//! — cookies, client hints, tracing baggage. None of it belongs upstream.
//! [`pick_headers`] keeps only the headers an explicit rule vouches for and
//! drops everything else.
//!
//! A rule is either an exact name or a predicate, so the allow-list can grow
//! pattern-shaped entries (say, every `x-api-*` header) without a rules
//! engine behind it.

use http::HeaderMap;

/// One allow-list entry.
#[derive(Clone, Copy, Debug)]
pub enum HeaderRule {
    /// Case-insensitive exact header name, e.g. `"authorization"`.
    Exact(&'static str),
    /// Arbitrary predicate over the (lowercase) header name.
    ///
    /// ```rust
    /// use groq_relay::HeaderRule;
    ///
    /// let rule = HeaderRule::Matches(|name| name.starts_with("x-api-"));
    /// assert!(rule.applies_to("x-api-version"));
    /// assert!(!rule.applies_to("cookie"));
    /// ```
    Matches(fn(&str) -> bool),
}

impl HeaderRule {
    /// Does this rule admit a header with the given name?
    pub fn applies_to(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name.eq_ignore_ascii_case(exact),
            Self::Matches(pred) => pred(name),
        }
    }
}

/// Returns the subset of `headers` admitted by at least one rule, values
/// untouched. Multi-valued headers keep every value.
pub fn pick_headers(headers: &HeaderMap, rules: &[HeaderRule]) -> HeaderMap {
    let mut picked = HeaderMap::new();
    for (name, value) in headers {
        if rules.iter().any(|rule| rule.applies_to(name.as_str())) {
            picked.append(name.clone(), value.clone());
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn rules() -> Vec<HeaderRule> {
        vec![
            HeaderRule::Exact("content-type"),
            HeaderRule::Exact("authorization"),
        ]
    }

    #[test]
    fn keeps_only_allow_listed_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-custom", HeaderValue::from_static("a"));
        inbound.insert("content-type", HeaderValue::from_static("application/json"));
        inbound.insert("authorization", HeaderValue::from_static("Bearer t"));
        inbound.insert("cookie", HeaderValue::from_static("session=1"));

        let picked = pick_headers(&inbound, &rules());

        assert_eq!(picked.len(), 2);
        assert_eq!(picked["content-type"], "application/json");
        assert_eq!(picked["authorization"], "Bearer t");
        assert!(!picked.contains_key("x-custom"));
        assert!(!picked.contains_key("cookie"));
    }

    #[test]
    fn exact_rules_match_case_insensitively() {
        // `http` lowercases header names on the wire, but rules must not
        // depend on that.
        assert!(HeaderRule::Exact("Content-Type").applies_to("content-type"));
        assert!(HeaderRule::Exact("authorization").applies_to("AUTHORIZATION"));
    }

    #[test]
    fn empty_rule_set_drops_everything() {
        let mut inbound = HeaderMap::new();
        inbound.insert("content-type", HeaderValue::from_static("text/plain"));

        assert!(pick_headers(&inbound, &[]).is_empty());
    }

    #[test]
    fn predicate_rules_admit_prefix_families() {
        let rules = [HeaderRule::Matches(|name| name.starts_with("x-api-"))];

        let mut inbound = HeaderMap::new();
        inbound.insert("x-api-version", HeaderValue::from_static("2"));
        inbound.insert("x-other", HeaderValue::from_static("nope"));

        let picked = pick_headers(&inbound, &rules);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked["x-api-version"], "2");
    }
}
