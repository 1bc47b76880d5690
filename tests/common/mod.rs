//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use redirect_gate::{GateConfig, HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A gate server running on an ephemeral local port.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server stops in time")
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}

/// Start the full server (all layers) for `config`.
pub async fn start_server(config: GateConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::try_new(config).expect("valid rules");
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
