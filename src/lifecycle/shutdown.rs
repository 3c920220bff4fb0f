//! Shutdown coordination.

use std::future::Future;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::wait_for_signal;

/// Broadcasts a single stop notification to every subscriber.
///
/// Servers subscribe before they start; tests trigger directly and the
/// binary triggers from OS signals.
#[derive(Clone)]
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

    /// Notify all subscribers. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    /// Trigger once Ctrl+C or SIGTERM arrives.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        self.trigger_when(wait_for_signal())
    }

    /// Trigger when `signal` resolves with `Ok`.
    ///
    /// An `Err` means no signal can ever arrive; it is logged and the
    /// server keeps running.
    pub fn trigger_when<F>(&self, signal: F) -> JoinHandle<()>
    where
        F: Future<Output = std::io::Result<&'static str>> + Send + 'static,
    {
        let shutdown = self.clone();
        tokio::spawn(async move {
            match signal.await {
                Ok(signal) => {
                    tracing::info!(signal, "Signal received");
                    shutdown.trigger();
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for signals");
                }
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
