//! Redirect target resolution.
//!
//! # Responsibilities
//! - Expand `$N` placeholders in the target with captured groups
//! - Fall back to the inbound `Location` header for empty targets
//! - Decide "no redirect" when nothing usable remains
//!
//! # Design Decisions
//! - Placeholders are 1-based; `$0` and out-of-range indices stay literal
//! - A `$` not followed by digits is kept as is
//! - An empty expansion result does not fall back to the header

use axum::http::StatusCode;

use super::matcher::RuleMatch;

/// Final redirect to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub location: String,
    pub status_code: StatusCode,
}

impl RuleMatch<'_, '_> {
    /// Resolve this match into a redirect.
    ///
    /// `inbound_location` is the request's `Location` header, if any.
    pub fn resolve(&self, inbound_location: Option<&str>) -> Option<RedirectDecision> {
        let target = self.rule.target();

        let location = if !target.is_empty() {
            if !self.captures.is_empty() && target.contains('$') {
                expand_placeholders(target, &self.captures)
            } else {
                target.to_string()
            }
        } else {
            inbound_location.unwrap_or_default().to_string()
        };

        if location.is_empty() {
            return None;
        }

        Some(RedirectDecision {
            location,
            status_code: self.rule.status_code(),
        })
    }
}

/// Replace every `$N` in `template` with `captures[N - 1]`.
pub fn expand_placeholders(template: &str, captures: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();

        let capture = after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| captures.get(i));

        match capture {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[dollar..dollar + 1 + digits]),
        }
        rest = &after[digits..];
    }

    out.push_str(rest);
    out
}
