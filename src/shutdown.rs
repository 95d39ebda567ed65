//! Cooperative shutdown signalling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Shared "shutdown requested" flag.
///
/// Loops poll [`ShutdownToken::is_triggered`] once per iteration; triggering is
/// sticky and visible to every clone.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    triggered: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

/// Triggers `token` on the first Ctrl-C. Must be called inside a tokio runtime.
pub fn trigger_on_ctrl_c(token: ShutdownToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, requesting shutdown.");
                token.trigger();
            }
            Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_is_shared_between_clones() {
        let token = ShutdownToken::new();
        let observer = token.clone();
        assert!(!observer.is_triggered());

        token.trigger();
        assert!(observer.is_triggered());

        // Sticky.
        token.trigger();
        assert!(token.is_triggered());
    }
}
