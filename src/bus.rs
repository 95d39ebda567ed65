use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;

/// Failure to hand a message to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The topic was closed; nothing published after that is delivered.
    #[error("topic `{0}` is closed")]
    Closed(String),
}

/// Anything a node can publish messages of type `T` on.
pub trait Publish<T> {
    /// Publish an already shared message. Returns the number of subscribers
    /// that were handed the message.
    fn publish_shared(&self, msg: Arc<T>) -> Result<usize, TransportError>;

    /// Name the messages are published under.
    fn topic_name(&self) -> &str;
}

/// Named broadcast topic with bounded capacity.
///
/// A latched topic keeps its last message so that subscribers which attach
/// after a one-shot publish can still read it through [`Topic::latest`].
/// `T` must be `Send + Sync` because we hop across threads.
pub struct Topic<T> {
    name: Arc<str>,
    tx: broadcast::Sender<Arc<T>>,
    latched: Option<Arc<RwLock<Option<Arc<T>>>>>,
    closed: Arc<AtomicBool>,
}

impl<T> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            tx: self.tx.clone(),
            latched: self.latched.clone(),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<T> fmt::Debug for Topic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("latched", &self.latched.is_some())
            .field("subscribers", &self.tx.receiver_count())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

impl<T: Send + Sync + 'static> Topic<T> {
    /// Creates a topic holding up to `capacity` undelivered messages per subscriber.
    pub fn new(name: impl Into<Arc<str>>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            name: name.into(),
            tx,
            latched: None,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a topic that retains its last published message.
    pub fn latched(name: impl Into<Arc<str>>, capacity: usize) -> Self {
        Self {
            latched: Some(Arc::new(RwLock::new(None))),
            ..Self::new(name, capacity)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publish(&self, msg: T) -> Result<usize, TransportError> {
        self.publish_shared(Arc::new(msg))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }

    /// Last message published on a latched topic.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.latched.as_ref().and_then(|slot| slot.read().clone())
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Closes the topic for every clone. Later publishes fail with
    /// [`TransportError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl<T: Send + Sync + 'static> Publish<T> for Topic<T> {
    fn publish_shared(&self, msg: Arc<T>) -> Result<usize, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed(self.name.to_string()));
        }
        if let Some(slot) = &self.latched {
            *slot.write() = Some(Arc::clone(&msg));
        }
        // A send error only means nobody is subscribed right now.
        Ok(self.tx.send(msg).unwrap_or(0))
    }

    fn topic_name(&self) -> &str {
        &self.name
    }
}
