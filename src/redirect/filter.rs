//! Skip predicates evaluated before any rule.
//!
//! # Responsibilities
//! - Decide whether a request bypasses redirect handling entirely
//! - Match Host header (exact, case-insensitive), path prefix, method
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Any `Fn(&Request<Body>) -> bool` is a filter
//! - Host matching is case-insensitive (per HTTP spec)
//! - Path matching is case-sensitive

use axum::body::Body;
use axum::http::{header, Method, Request};

/// Predicate that, when true, lets the request bypass all redirect rules.
pub trait RequestFilter: Send + Sync {
    fn skip(&self, req: &Request<Body>) -> bool;
}

impl<F> RequestFilter for F
where
    F: Fn(&Request<Body>) -> bool + Send + Sync,
{
    fn skip(&self, req: &Request<Body>) -> bool {
        self(req)
    }
}

/// Skips requests for a given Host header.
#[derive(Debug, Clone)]
pub struct HostFilter {
    host: String,
}

impl HostFilter {
    /// The host is normalized to lowercase for case-insensitive matching.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into().to_lowercase(),
        }
    }
}

impl RequestFilter for HostFilter {
    fn skip(&self, req: &Request<Body>) -> bool {
        req.headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(|h| h.to_lowercase() == self.host)
            .unwrap_or(false)
    }
}

/// Skips requests whose path starts with a prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixFilter {
    prefix: String,
}

impl PathPrefixFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl RequestFilter for PathPrefixFilter {
    fn skip(&self, req: &Request<Body>) -> bool {
        req.uri().path().starts_with(&self.prefix)
    }
}

/// Skips requests with a given method.
#[derive(Debug, Clone)]
pub struct MethodFilter {
    method: Method,
}

impl MethodFilter {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl RequestFilter for MethodFilter {
    fn skip(&self, req: &Request<Body>) -> bool {
        req.method() == self.method
    }
}

/// Skips when any inner filter does.
#[derive(Default)]
pub struct AnyFilter {
    filters: Vec<Box<dyn RequestFilter>>,
}

impl AnyFilter {
    pub fn new(filters: Vec<Box<dyn RequestFilter>>) -> Self {
        Self { filters }
    }
}

impl RequestFilter for AnyFilter {
    fn skip(&self, req: &Request<Body>) -> bool {
        self.filters.iter().any(|f| f.skip(req))
    }
}

impl std::fmt::Debug for AnyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyFilter")
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, uri: &str, host: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(host) = host {
            builder = builder.header("Host", host);
        }
        builder.body(Body::default()).unwrap()
    }

    #[test]
    fn test_host_filter() {
        let filter = HostFilter::new("Internal.Example.com");

        assert!(filter.skip(&request(Method::GET, "/", Some("internal.example.com"))));
        assert!(filter.skip(&request(Method::GET, "/", Some("INTERNAL.EXAMPLE.COM"))));
        assert!(!filter.skip(&request(Method::GET, "/", Some("other.com"))));
        assert!(!filter.skip(&request(Method::GET, "/", None)));
    }

    #[test]
    fn test_path_prefix_filter() {
        let filter = PathPrefixFilter::new("/health");

        assert!(filter.skip(&request(Method::GET, "/health", None)));
        assert!(filter.skip(&request(Method::GET, "/healthz/live", None)));
        assert!(!filter.skip(&request(Method::GET, "/Health", None)));
        assert!(!filter.skip(&request(Method::GET, "/api/health", None)));
    }

    #[test]
    fn test_method_filter() {
        let filter = MethodFilter::new(Method::OPTIONS);
        assert!(filter.skip(&request(Method::OPTIONS, "/", None)));
        assert!(!filter.skip(&request(Method::GET, "/", None)));
    }

    #[test]
    fn test_closure_filter() {
        let filter = |req: &Request<Body>| req.headers().contains_key("x-no-redirect");

        let mut req = request(Method::GET, "/", None);
        assert!(!filter.skip(&req));
        req.headers_mut().insert("x-no-redirect", "1".parse().unwrap());
        assert!(filter.skip(&req));
    }

    #[test]
    fn test_any_filter_ors_conditions() {
        let filter = AnyFilter::new(vec![
            Box::new(HostFilter::new("admin.local")),
            Box::new(PathPrefixFilter::new("/static/")),
            Box::new(MethodFilter::new(Method::OPTIONS)),
        ]);

        assert!(filter.skip(&request(Method::GET, "/x", Some("admin.local"))));
        assert!(filter.skip(&request(Method::GET, "/static/app.js", None)));
        assert!(filter.skip(&request(Method::OPTIONS, "/x", None)));
        assert!(!filter.skip(&request(Method::GET, "/x", Some("public.local"))));
    }

    #[test]
    fn test_empty_any_filter_never_skips() {
        let filter = AnyFilter::default();
        assert!(!filter.skip(&request(Method::GET, "/", None)));
    }
}
