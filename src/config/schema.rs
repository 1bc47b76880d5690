//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gate.
//! All types derive Serde traits for deserialization from config files.

use std::sync::Arc;

use axum::http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::redirect::{
    AnyFilter, HostFilter, MethodFilter, PathPrefixFilter, RedirectOptions, RequestFilter, RuleDef,
};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Redirect rules, default status and skip filter.
    pub redirect: RedirectSection,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// The `[redirect]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectSection {
    /// Status for rules that omit a valid one.
    pub default_status_code: u16,

    /// Full rule definitions, in precedence order.
    pub rules: Vec<RuleConfig>,

    /// Shorthand `pattern = "target"` entries, checked after `rules`.
    pub targets: IndexMap<String, String>,

    /// Requests matching this filter bypass all rules.
    pub filter: FilterConfig,
}

impl Default for RedirectSection {
    fn default() -> Self {
        Self {
            default_status_code: 302,
            rules: Vec::new(),
            targets: IndexMap::new(),
            filter: FilterConfig::default(),
        }
    }
}

impl RedirectSection {
    /// `rules` followed by `targets`, in declaration order.
    pub fn all_rules(&self) -> Vec<RuleConfig> {
        self.rules
            .iter()
            .cloned()
            .chain(self.targets.iter().map(|(pattern, target)| RuleConfig {
                pattern: pattern.clone(),
                target: target.clone(),
                status_code: None,
            }))
            .collect()
    }

    /// Gate construction options for this section.
    pub fn to_options(&self) -> RedirectOptions {
        RedirectOptions {
            filter: self
                .filter
                .build()
                .map(|f| Arc::new(f) as Arc<dyn RequestFilter>),
            rules: self.all_rules().into_iter().map(RuleDef::from).collect(),
            default_status_code: Some(self.default_status_code),
        }
    }
}

/// A single redirect rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Literal path, glob (`/docs/*`) or regular expression.
    pub pattern: String,

    /// Destination; may use `$1`, `$2`, ... Empty means "use the request's
    /// Location header".
    #[serde(default)]
    pub target: String,

    /// Redirect status (300-308). Falls back to the section default.
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl From<RuleConfig> for RuleDef {
    fn from(rule: RuleConfig) -> Self {
        RuleDef::new(rule.pattern, rule.target, rule.status_code)
    }
}

/// Skip conditions, combined with OR.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Host header values (case-insensitive).
    pub hosts: Vec<String>,

    /// Path prefixes (case-sensitive).
    pub path_prefixes: Vec<String>,

    /// HTTP methods.
    pub methods: Vec<String>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.path_prefixes.is_empty() && self.methods.is_empty()
    }

    /// Returns `None` when the section declares no usable conditions.
    pub fn build(&self) -> Option<AnyFilter> {
        let mut filters: Vec<Box<dyn RequestFilter>> = Vec::new();

        for host in &self.hosts {
            filters.push(Box::new(HostFilter::new(host.as_str())));
        }
        for prefix in &self.path_prefixes {
            filters.push(Box::new(PathPrefixFilter::new(prefix.as_str())));
        }
        for method in &self.methods {
            match Method::from_bytes(method.to_uppercase().as_bytes()) {
                Ok(method) => filters.push(Box::new(MethodFilter::new(method))),
                Err(_) => tracing::warn!(method = %method, "Ignoring invalid method in redirect filter"),
            }
        }

        if filters.is_empty() {
            None
        } else {
            Some(AnyFilter::new(filters))
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
