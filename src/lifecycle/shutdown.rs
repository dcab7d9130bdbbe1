//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// The server and any background task subscribe; one `trigger` stops them all.
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

    /// Signal every subscriber. Calling it twice is harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Trigger once the process receives SIGINT/SIGTERM.
    pub fn trigger_on_signal(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            crate::lifecycle::signals::termination().await;
            self.trigger();
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when the coordinator fires or is dropped.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    // Closed and Lagged both mean the signal was sent or can no longer arrive.
    let _ = rx.recv().await;
    tracing::info!("Shutdown signal received");
}
