//! Rule set construction errors.

/// Error raised while compiling a [`RuleSet`](super::RuleSet).
///
/// Every variant is fatal: the host must not start serving with a rule set
/// that failed to build.
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("redirect rule #{index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("redirect pattern '{0}' is declared more than once")]
    DuplicatePattern(String),

    #[error("invalid redirect pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
