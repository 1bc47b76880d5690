//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http layers)
//!     → redirect gate (redirect response, or continue)
//!     → /health handler, or 404 fallback
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
