//! Path matching against a [`RuleSet`].
//!
//! # Responsibilities
//! - Scan rules in declaration order
//! - Stop at the first rule whose pattern covers the whole path
//! - Hand back the rule together with its captures
//!
//! # Design Decisions
//! - Overlapping rules are not reported as ambiguous; the earlier one wins
//! - Captures borrow from the request path, no allocation per segment

use super::rule::Rule;
use super::rule_set::RuleSet;

/// A successful match: the rule plus its captured groups.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'r, 'p> {
    pub rule: &'r Rule,
    pub captures: Vec<&'p str>,
}

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<'r, 'p> {
    NoMatch,
    Matched(RuleMatch<'r, 'p>),
}

impl RuleSet {
    /// Find the first rule matching `path`.
    pub fn match_path<'r, 'p>(&'r self, path: &'p str) -> MatchResult<'r, 'p> {
        self.rules()
            .iter()
            .find_map(|rule| {
                rule.captures(path)
                    .map(|captures| RuleMatch { rule, captures })
            })
            .map_or(MatchResult::NoMatch, MatchResult::Matched)
    }
}
