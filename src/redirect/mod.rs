//! Redirect decision subsystem.
//!
//! # Data Flow
//! ```text
//! Rule Compilation (at startup):
//!     RuleDef[] / pattern → target map
//!     → rule.rs (classify literal / glob / regex, normalize status)
//!     → rule_set.rs (reject duplicates, freeze in declaration order)
//!     → Arc<RuleSet>, shared by every request
//!
//! Incoming Request:
//!     → gate.rs (filter predicate, skip if true)
//!     → matcher.rs (first rule matching the path, with captures)
//!     → resolver.rs (target template, or inbound Location header)
//!     → Redirect response, or Next handler
//! ```
//!
//! # Design Decisions
//! - Rules compiled once, immutable at runtime
//! - First match wins, in declaration order
//! - Invalid patterns fail construction, never the first request
//! - Unresolvable redirects fall through instead of erroring

pub mod error;
pub mod filter;
pub mod gate;
pub mod matcher;
pub mod resolver;
pub mod rule;
pub mod rule_set;

pub use error::RuleSetError;
pub use filter::{AnyFilter, HostFilter, MethodFilter, PathPrefixFilter, RequestFilter};
pub use gate::{redirect_middleware, GateOutcome, RedirectGate, RedirectOptions};
pub use matcher::{MatchResult, RuleMatch};
pub use resolver::RedirectDecision;
pub use rule::{Rule, RuleDef, DEFAULT_STATUS_CODE};
pub use rule_set::RuleSet;
