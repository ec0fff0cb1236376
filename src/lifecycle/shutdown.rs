//! Shutdown coordination.
//!
//! Once triggered the latch stays set; waiters created afterwards resolve
//! immediately.

use std::future::Future;
use tokio::sync::watch;

/// Coordinator for graceful shutdown.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Future that resolves once shutdown is triggered.
    ///
    /// Shaped for `axum::serve(..).with_graceful_shutdown`. Dropping the
    /// coordinator also resolves it.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }

    /// Trip the latch. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Number of pending `wait` futures.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
