//! Inbound callback queue serviced by the node's tick loop.
//!
//! Producers (signal handlers, subscriptions, tests) enqueue closures through a
//! [`CallbackHandle`]; the node runs them on its own task when it spins.

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Work scheduled onto the node task.
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable sender side of an [`Executor`].
#[derive(Debug, Clone)]
pub struct CallbackHandle {
    tx: mpsc::UnboundedSender<Callback>,
}

impl CallbackHandle {
    /// Queues `callback`. Returns `false` if the executor is gone.
    pub fn schedule<F>(&self, callback: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Box::new(callback)).is_err() {
            warn!("Executor dropped, callback discarded.");
            return false;
        }
        true
    }
}

#[derive(Debug)]
pub struct Executor {
    tx: mpsc::UnboundedSender<Callback>,
    rx: mpsc::UnboundedReceiver<Callback>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> CallbackHandle {
        CallbackHandle {
            tx: self.tx.clone(),
        }
    }

    /// Runs the callbacks that were queued when the call started, without
    /// waiting for new ones. Callbacks scheduled meanwhile wait for the next
    /// spin. Returns how many ran.
    pub fn spin_once(&mut self) -> usize {
        let pending = self.rx.len();
        let mut ran = 0;
        while ran < pending {
            let Ok(callback) = self.rx.try_recv() else {
                break;
            };
            callback();
            ran += 1;
        }
        if ran > 0 {
            debug!(callbacks = ran, "Serviced inbound callbacks");
        }
        ran
    }

    /// Final drain on shutdown: no new producers are accepted, and everything
    /// already queued runs before the executor is dropped.
    pub fn shutdown(mut self) -> usize {
        self.rx.close();
        self.spin_once()
    }
}
