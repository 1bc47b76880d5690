//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a single "stop serving" event to every subscriber.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify all subscribers. Subscribers created afterwards are not notified.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Resolves once the shutdown event arrives on `rx`, or the sender is gone.
    pub async fn wait(mut rx: broadcast::Receiver<()>) {
        let _ = rx.recv().await;
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
