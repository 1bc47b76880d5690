//! Redirect gate library.
//!
//! Decides, per request, whether a configured rule redirects the request
//! path, and plugs into an axum router as a middleware.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use config::GateConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{redirect_middleware, RedirectGate, RedirectOptions, RuleSet};
