//! Ordered, immutable collection of compiled rules.
//!
//! # Responsibilities
//! - Compile rule definitions once, at startup
//! - Preserve declaration order (first match wins)
//! - Reject duplicate and invalid patterns
//!
//! # Design Decisions
//! - Backed by a `Vec`, never by an unordered map: precedence must not
//!   depend on hash iteration order
//! - No mutation API; share via `Arc`

use std::collections::HashSet;

use axum::http::StatusCode;

use super::error::RuleSetError;
use super::rule::{redirect_status, Rule, RuleDef, DEFAULT_STATUS_CODE};

/// Compiled redirect rules in declaration order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    default_status: StatusCode,
}

impl RuleSet {
    /// Build from full rule definitions.
    ///
    /// `default_status` applies to rules without a valid explicit status. A
    /// default outside 300-308 (or `None`) resolves to 302.
    pub fn from_rules<I>(rules: I, default_status: Option<u16>) -> Result<Self, RuleSetError>
    where
        I: IntoIterator<Item = RuleDef>,
    {
        let default_status = default_status
            .and_then(redirect_status)
            .unwrap_or(DEFAULT_STATUS_CODE);

        let mut seen = HashSet::new();
        let mut compiled = Vec::new();

        for (index, rule) in rules.into_iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(RuleSetError::EmptyPattern { index });
            }
            if !seen.insert(rule.pattern.clone()) {
                return Err(RuleSetError::DuplicatePattern(rule.pattern));
            }

            let rule = Rule::compile(rule.pattern, rule.target, rule.status_code, default_status)?;
            tracing::debug!(
                pattern = %rule.pattern(),
                target = %rule.target(),
                status = rule.status_code().as_u16(),
                wildcard = rule.is_wildcard(),
                "Compiled redirect rule"
            );
            compiled.push(rule);
        }

        Ok(Self {
            rules: compiled,
            default_status,
        })
    }

    /// Build from an ordered pattern → target mapping sharing one status.
    pub fn from_targets<I, K, V>(targets: I, default_status: Option<u16>) -> Result<Self, RuleSetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_rules(
            targets
                .into_iter()
                .map(|(pattern, target)| RuleDef::new(pattern, target, None)),
            default_status,
        )
    }

    /// An empty rule set; never matches.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            default_status: DEFAULT_STATUS_CODE,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Status applied to rules that did not carry a valid one.
    pub fn default_status(&self) -> StatusCode {
        self.default_status
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(pattern: &str, target: &str, status_code: Option<u16>) -> RuleDef {
        RuleDef::new(pattern, target, status_code)
    }

    #[test]
    fn test_preserves_declaration_order() {
        let set = RuleSet::from_rules(
            vec![
                def("/z", "a", None),
                def("/a/*", "b", None),
                def("/m", "c", None),
            ],
            None,
        )
        .unwrap();

        let patterns: Vec<&str> = set.rules().iter().map(Rule::pattern).collect();
        assert_eq!(patterns, vec!["/z", "/a/*", "/m"]);
    }

    #[test]
    fn test_default_status() {
        let set = RuleSet::from_rules(vec![def("/a", "b", None)], Some(307)).unwrap();
        assert_eq!(set.default_status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(set.rules()[0].status_code(), StatusCode::TEMPORARY_REDIRECT);

        let set = RuleSet::from_rules(vec![def("/a", "b", None)], Some(404)).unwrap();
        assert_eq!(set.default_status(), StatusCode::FOUND);

        let set = RuleSet::from_rules(vec![def("/a", "b", None)], None).unwrap();
        assert_eq!(set.rules()[0].status_code(), StatusCode::FOUND);
    }

    #[test]
    fn test_explicit_status_wins_over_default() {
        let set = RuleSet::from_rules(vec![def("/a", "b", Some(308))], Some(301)).unwrap();
        assert_eq!(set.rules()[0].status_code(), StatusCode::PERMANENT_REDIRECT);
    }

    #[test]
    fn test_from_targets() {
        let set = RuleSet::from_targets([("/old", "/new"), ("/docs/*", "/manual")], Some(301)).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[1].pattern(), "/docs/*");
        assert!(set.rules().iter().all(|r| r.status_code() == StatusCode::MOVED_PERMANENTLY));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = RuleSet::from_rules(vec![def("/a", "1", None), def("/a", "2", None)], None).unwrap_err();
        assert!(matches!(err, RuleSetError::DuplicatePattern(p) if p == "/a"));
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let err = RuleSet::from_rules(vec![def("/a", "1", None), def("", "2", None)], None).unwrap_err();
        assert!(matches!(err, RuleSetError::EmptyPattern { index: 1 }));
    }

    #[test]
    fn test_invalid_pattern_fails_construction() {
        let result = RuleSet::from_targets([("/ok", "x"), ("/bad/[", "y")], None);
        assert!(matches!(result, Err(RuleSetError::InvalidPattern { .. })));
    }

    #[test]
    fn test_empty() {
        assert!(RuleSet::empty().is_empty());
        assert!(RuleSet::from_targets(Vec::<(String, String)>::new(), None).unwrap().is_empty());
    }
}
