//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast-based shutdown coordinator.
///
/// The server and any background task subscribe; one `trigger` reaches
/// them all. Used by tests to stop a served instance deterministically,
/// and by main as the programmatic counterpart to OS signals.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Obtain a receiver that resolves once shutdown is triggered.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every subscriber. Subscribers that already went away are
    /// not an error.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still holding a receiver.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
