//! Redirect gate server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 REDIRECT GATE                  │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  axum   │──▶│  filter  │──▶│   matcher   │  │
//!                    │  │ server  │   │ (skip?)  │   │ (RuleSet)   │  │
//!                    │  └─────────┘   └────┬─────┘   └──────┬──────┘  │
//!                    │                     │ skip           │ match   │
//!                    │                     ▼                ▼         │
//!   Client Response  │  ┌──────────────────────┐   ┌─────────────┐    │
//!   ◀────────────────┼──│ next handler (404 /  │   │  resolver   │    │
//!                    │  │ health)              │   │ → 3xx +     │    │
//!   ◀────────────────┼──┼──────────────────────┼───│   Location  │    │
//!                    │  └──────────────────────┘   └─────────────┘    │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use redirect_gate::config::{load_config, GateConfig};
use redirect_gate::lifecycle::{signals, Shutdown};
use redirect_gate::observability::{logging, metrics};
use redirect_gate::{HttpServer, RedirectGate};

#[derive(Parser)]
#[command(name = "redirect-gate")]
#[command(about = "HTTP redirect gate driven by pattern rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve HTTP, redirecting requests that match the configured rules
    Serve {
        /// TOML config file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a config file and print the compiled rules
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Check { config } => check(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!("redirect-gate v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::try_new(config).inspect_err(|e| {
        tracing::error!(error = %e, "Invalid redirect rules, refusing to start");
    })?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn check(path: &Path) -> Result<(), Box<dyn Error>> {
    let config = load_config(path)?;
    let gate = RedirectGate::new(config.redirect.to_options())?;

    println!(
        "{} rule(s), default status {}, filter {}",
        gate.rules().len(),
        gate.rules().default_status().as_u16(),
        if gate.has_filter() { "on" } else { "off" }
    );
    for (i, rule) in gate.rules().rules().iter().enumerate() {
        let target = if rule.target().is_empty() {
            "<Location header>"
        } else {
            rule.target()
        };
        println!(
            "{:>3}  {:<8}  {}  {} -> {}",
            i + 1,
            if rule.is_wildcard() { "wildcard" } else { "literal" },
            rule.status_code().as_u16(),
            rule.pattern(),
            target
        );
    }
    Ok(())
}
