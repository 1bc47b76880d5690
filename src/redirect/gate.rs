//! Per-request redirect entry point.
//!
//! # Responsibilities
//! - Evaluate the filter, then match and resolve against the rule set
//! - Short-circuit with a redirect response on a decision
//! - Otherwise hand the request to the next handler, untouched
//!
//! # Usage
//! ```rust,ignore
//! let gate = RedirectGate::new(RedirectOptions::new().target("/old", "/new"))?;
//! let app = Router::new()
//!     .route("/new", get(handler))
//!     .layer(middleware::from_fn_with_state(gate, redirect_middleware));
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::observability::metrics;

use super::error::RuleSetError;
use super::filter::RequestFilter;
use super::matcher::MatchResult;
use super::resolver::RedirectDecision;
use super::rule::RuleDef;
use super::rule_set::RuleSet;

/// Construction options for [`RedirectGate`].
#[derive(Default)]
pub struct RedirectOptions {
    /// When it returns true, the request skips all redirect logic.
    pub filter: Option<Arc<dyn RequestFilter>>,
    /// Rules in precedence order.
    pub rules: Vec<RuleDef>,
    /// Fallback status for rules without a valid one (302 when unset).
    pub default_status_code: Option<u16>,
}

impl RedirectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, pattern: impl Into<String>, target: impl Into<String>, status_code: u16) -> Self {
        self.rules.push(RuleDef::new(pattern, target, Some(status_code)));
        self
    }

    /// Add a rule using the default status code.
    pub fn target(mut self, pattern: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.push(RuleDef::new(pattern, target, None));
        self
    }

    pub fn filter(mut self, filter: impl RequestFilter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn default_status_code(mut self, status_code: u16) -> Self {
        self.default_status_code = Some(status_code);
        self
    }
}

/// What the gate decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The filter asked to skip redirect handling.
    Filtered,
    /// No rule covers the path.
    NoMatch,
    /// A rule matched but no non-empty location could be resolved.
    Unresolved,
    Redirect(RedirectDecision),
}

impl GateOutcome {
    /// Metric label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            GateOutcome::Filtered => "filtered",
            GateOutcome::NoMatch => "no_match",
            GateOutcome::Unresolved => "unresolved",
            GateOutcome::Redirect(_) => "redirected",
        }
    }
}

/// Immutable redirect state shared by every request.
#[derive(Clone)]
pub struct RedirectGate {
    rules: Arc<RuleSet>,
    filter: Option<Arc<dyn RequestFilter>>,
}

impl RedirectGate {
    /// Compile the rules. Any invalid pattern aborts construction.
    pub fn new(options: RedirectOptions) -> Result<Self, RuleSetError> {
        let rules = RuleSet::from_rules(options.rules, options.default_status_code)?;
        Ok(Self::with_rule_set(rules, options.filter))
    }

    pub fn with_rule_set(rules: RuleSet, filter: Option<Arc<dyn RequestFilter>>) -> Self {
        Self {
            rules: Arc::new(rules),
            filter,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Decide what to do with `req` without touching it.
    pub fn evaluate(&self, req: &Request<Body>) -> GateOutcome {
        if let Some(filter) = &self.filter {
            if filter.skip(req) {
                return GateOutcome::Filtered;
            }
        }

        let rule_match = match self.rules.match_path(req.uri().path()) {
            MatchResult::Matched(m) => m,
            MatchResult::NoMatch => return GateOutcome::NoMatch,
        };

        // Any UTF-8, not just visible ASCII.
        let inbound_location = req
            .headers()
            .get(header::LOCATION)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok());

        match rule_match.resolve(inbound_location) {
            Some(decision) => GateOutcome::Redirect(decision),
            None => {
                tracing::debug!(
                    path = %req.uri().path(),
                    pattern = %rule_match.rule.pattern(),
                    "Rule matched but no location resolved"
                );
                GateOutcome::Unresolved
            }
        }
    }
}

impl std::fmt::Debug for RedirectGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectGate")
            .field("rules", &self.rules.len())
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Middleware function for redirects; install with
/// `axum::middleware::from_fn_with_state`.
pub async fn redirect_middleware(
    State(gate): State<RedirectGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let outcome = gate.evaluate(&request);

    let decision = match outcome {
        GateOutcome::Redirect(decision) => decision,
        outcome => {
            tracing::trace!(path = %request.uri().path(), outcome = outcome.label(), "Passing request on");
            metrics::record_outcome(outcome.label());
            return next.run(request).await;
        }
    };

    match HeaderValue::from_str(&decision.location) {
        Ok(location) => {
            tracing::debug!(
                path = %request.uri().path(),
                location = %decision.location,
                status = decision.status_code.as_u16(),
                "Redirecting request"
            );
            metrics::record_outcome("redirected");
            metrics::record_redirect(decision.status_code.as_u16());

            let mut response = Response::new(Body::empty());
            *response.status_mut() = decision.status_code;
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(e) => {
            tracing::error!(
                path = %request.uri().path(),
                location = %decision.location,
                error = %e,
                "Resolved redirect location is not a valid header value"
            );
            metrics::record_outcome("failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect location").into_response()
        }
    }
}
