//! A single compiled redirect rule.
//!
//! # Pattern Kinds
//! - Literal: `/default`, matched by exact equality
//! - Glob: `/default/*`, each `*` captures any suffix (`(.*)`)
//! - Regex: anything with regex metacharacters, e.g. `/u/([0-9]+)/(.*)`
//!
//! Globs and regexes are anchored to the whole path. `.` is not treated as a
//! metacharacter on its own so that file-like paths (`/index.html`) stay
//! literal. As a consequence `/docs/.*` is a glob matching `/docs/.` followed
//! by anything, not a regex; write `/docs/(.*)` for the regex form.

use axum::http::StatusCode;
use regex::Regex;

use super::error::RuleSetError;

/// Status used when neither the rule nor the rule set supplies a valid one.
pub const DEFAULT_STATUS_CODE: StatusCode = StatusCode::FOUND;

const WILDCARD: char = '*';
const REGEX_METACHARACTERS: &[char] = &['(', ')', '[', ']', '{', '}', '^', '$', '|', '+', '?', '\\'];

#[derive(Debug, Clone)]
enum PathPattern {
    Literal,
    Expression(Regex),
}

/// Uncompiled rule definition, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    /// Literal path, glob (`/docs/*`) or regular expression.
    pub pattern: String,
    /// Destination; may use `$1`, `$2`, ... Empty means "use the request's
    /// Location header".
    pub target: String,
    /// Redirect status (300-308). Falls back to the rule set default.
    pub status_code: Option<u16>,
}

impl RuleDef {
    pub fn new(pattern: impl Into<String>, target: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
            status_code,
        }
    }
}

/// A redirect directive: pattern, target template and status code.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    target: String,
    status_code: StatusCode,
    path_pattern: PathPattern,
}

impl Rule {
    /// Compile a rule.
    ///
    /// `status_code` is kept when it is a redirect status (300-308), otherwise
    /// `default_status` applies.
    pub fn compile(
        pattern: impl Into<String>,
        target: impl Into<String>,
        status_code: Option<u16>,
        default_status: StatusCode,
    ) -> Result<Self, RuleSetError> {
        let pattern = pattern.into();
        let target = target.into();

        let status_code = match status_code {
            None => default_status,
            Some(code) => redirect_status(code).unwrap_or_else(|| {
                tracing::warn!(
                    pattern = %pattern,
                    status_code = code,
                    default = default_status.as_u16(),
                    "Status code is not a redirect status, using default"
                );
                default_status
            }),
        };

        let path_pattern = match expression_source(&pattern) {
            None => PathPattern::Literal,
            Some(source) => {
                let regex = Regex::new(&source).map_err(|source| RuleSetError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                PathPattern::Expression(regex)
            }
        };

        Ok(Self {
            pattern,
            target,
            status_code,
            path_pattern,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Target template. Empty means "use the inbound `Location` header".
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// True for glob and regex rules.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.path_pattern, PathPattern::Expression(_))
    }

    /// Match `path` against this rule.
    ///
    /// Returns the capture groups in order (empty for literal rules). Groups
    /// that did not participate in the match are returned as `""`.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        match &self.path_pattern {
            PathPattern::Literal => (path == self.pattern).then(Vec::new),
            PathPattern::Expression(regex) => {
                let caps = regex.captures(path)?;
                Some(
                    caps.iter()
                        .skip(1)
                        .map(|group| group.map_or("", |m| m.as_str()))
                        .collect(),
                )
            }
        }
    }
}

// Patterns are unique within a rule set, so they identify the rule.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Returns `code` as a [`StatusCode`] when it is in the 300-308 range.
pub fn redirect_status(code: u16) -> Option<StatusCode> {
    if (300..=308).contains(&code) {
        StatusCode::from_u16(code).ok()
    } else {
        None
    }
}

/// Anchored regex source for non-literal patterns, `None` for literals.
fn expression_source(pattern: &str) -> Option<String> {
    if pattern.contains(REGEX_METACHARACTERS) {
        let mut inner = pattern.strip_prefix('^').unwrap_or(pattern);
        if let Some(stripped) = inner.strip_suffix('$') {
            if !stripped.ends_with('\\') {
                inner = stripped;
            }
        }
        return Some(format!("^(?:{inner})$"));
    }

    if pattern.contains(WILDCARD) {
        if pattern.contains(".*") {
            tracing::warn!(
                pattern = %pattern,
                "Glob pattern contains '.*'; the '.' is matched literally"
            );
        }
        let escaped: Vec<String> = pattern.split(WILDCARD).map(regex::escape).collect();
        return Some(format!("^{}$", escaped.join("(.*)")));
    }

    None
}
