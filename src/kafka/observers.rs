// Fetch lifecycle observers
//
// Observers are notified when a stream, topic or partition has no more data
// in the current Fetch response. Each observer opts into any subset of the
// three events through the capability accessors on `Observer`; registering
// an observer that opts into none of them is rejected.
//
// ## Thread Safety
//
// The registry is shared by every decoder in a fetch session. Entries sit
// behind a parking_lot RwLock. Dispatch snapshots the entries first and
// calls observers with no lock held, so an observer may register or
// unregister others from inside a callback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::error::{FetchError, Result};
use super::partition::PartitionEnd;

/// Reacts to the end of a whole broker stream
pub trait StreamObserver: Send + Sync {
    fn on_stream_end(&self, stream_key: &str);
}

/// Reacts to the end of every partition of a topic in a response
pub trait TopicObserver: Send + Sync {
    fn on_topic_end(&self, topic: &str);
}

/// Reacts to the end of one partition's message set
pub trait PartitionObserver: Send + Sync {
    fn on_partition_end(&self, partition: &PartitionEnd);
}

/// Base observer contract
///
/// Implementors return `Some(self)` from the accessors matching the
/// capability traits they implement:
///
/// ```rust,ignore
/// impl Observer for OffsetTracker {
///     fn as_partition_observer(&self) -> Option<&dyn PartitionObserver> {
///         Some(self)
///     }
/// }
/// ```
pub trait Observer: Send + Sync {
    fn as_stream_observer(&self) -> Option<&dyn StreamObserver> {
        None
    }

    fn as_topic_observer(&self) -> Option<&dyn TopicObserver> {
        None
    }

    fn as_partition_observer(&self) -> Option<&dyn PartitionObserver> {
        None
    }
}

/// Capability set advertised by an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub stream: bool,
    pub topic: bool,
    pub partition: bool,
}

impl Capabilities {
    pub fn of(observer: &dyn Observer) -> Self {
        Capabilities {
            stream: observer.as_stream_observer().is_some(),
            topic: observer.as_topic_observer().is_some(),
            partition: observer.as_partition_observer().is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.stream || self.topic || self.partition)
    }
}

/// Whether a notification found any registered observers
///
/// This reports registry occupancy only. `Dispatched` is returned even
/// when no registered observer handles that particular event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    NoObservers,
    Dispatched,
}

impl Dispatch {
    pub fn is_dispatched(self) -> bool {
        self == Dispatch::Dispatched
    }
}

/// Builds a default observer instance for a key
pub type ObserverFactory = Arc<dyn Fn() -> Arc<dyn Observer> + Send + Sync>;

/// Keyed collection of observers for one fetch session
#[derive(Default)]
pub struct ObserverRegistry {
    /// Insertion-ordered; re-registering a key keeps its position
    observers: RwLock<Vec<(String, Arc<dyn Observer>)>>,
    factories: RwLock<HashMap<String, ObserverFactory>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` resolvable by `register(key, None)`
    pub fn register_factory<F>(&self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn Observer> + Send + Sync + 'static,
    {
        self.factories.write().insert(key.into(), Arc::new(factory));
    }

    /// Register an observer under `key`, replacing any existing entry
    ///
    /// With no instance, the factory registered for `key` builds one.
    ///
    /// # Errors
    /// - `UnresolvedObserver` if no instance is given and no factory exists
    /// - `ObserverContract` if the observer advertises no capability
    pub fn register(&self, key: &str, observer: Option<Arc<dyn Observer>>) -> Result<()> {
        let observer = match observer {
            Some(observer) => observer,
            None => {
                let factory = self
                    .factories
                    .read()
                    .get(key)
                    .cloned()
                    .ok_or_else(|| FetchError::UnresolvedObserver(key.to_string()))?;
                factory()
            }
        };

        let capabilities = Capabilities::of(observer.as_ref());
        if capabilities.is_empty() {
            return Err(FetchError::ObserverContract(key.to_string()));
        }

        let mut observers = self.observers.write();
        match observers.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = observer,
            None => observers.push((key.to_string(), observer)),
        }

        debug!(
            "Registered observer {}: stream={}, topic={}, partition={}",
            key, capabilities.stream, capabilities.topic, capabilities.partition
        );
        Ok(())
    }

    /// Remove the observer under `key`; returns whether one was present
    pub fn unregister(&self, key: &str) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| existing != key);
        let removed = observers.len() != before;
        if removed {
            debug!("Unregistered observer {}", key);
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.observers.read().iter().any(|(existing, _)| existing == key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.observers
            .read()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    pub fn notify_stream_end(&self, stream_key: &str) -> Dispatch {
        self.dispatch(|observer| {
            if let Some(handler) = observer.as_stream_observer() {
                handler.on_stream_end(stream_key);
            }
        })
    }

    pub fn notify_topic_end(&self, topic: &str) -> Dispatch {
        self.dispatch(|observer| {
            if let Some(handler) = observer.as_topic_observer() {
                handler.on_topic_end(topic);
            }
        })
    }

    pub fn notify_partition_end(&self, partition: &PartitionEnd) -> Dispatch {
        self.dispatch(|observer| {
            if let Some(handler) = observer.as_partition_observer() {
                handler.on_partition_end(partition);
            }
        })
    }

    fn dispatch<F>(&self, notify: F) -> Dispatch
    where
        F: Fn(&dyn Observer),
    {
        let snapshot: Vec<Arc<dyn Observer>> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        if snapshot.is_empty() {
            return Dispatch::NoObservers;
        }

        for observer in &snapshot {
            notify(observer.as_ref());
        }
        Dispatch::Dispatched
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.keys())
            .field("factories", &self.factories.read().len())
            .finish()
    }
}
