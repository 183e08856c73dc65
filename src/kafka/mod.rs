// Kafka Fetch-response consumption module
//
// This module contains everything needed to turn one partition's slice of a
// Fetch response into messages:
// - Binary message set decoding with truncation recovery
// - The partition collaborator that owns the stream and committed offset
// - Observers notified when a stream, topic or partition is exhausted
// - The shared per-session context (config + observer registry)
//
// Architecture Overview:
// =====================
//
//   FetchContext ──owns──> ObserverRegistry
//        │                        ▲
//        │ borrowed by            │ notify_partition_end
//        ▼                        │
//   MessageSet ──&mut──> Partition ──> ByteStream
//
// A MessageSet is created per partition payload, pulled until EndOfSet and
// finalized once. The registry outlives every MessageSet of the session.

pub mod constants;
pub mod context;
pub mod error;
pub mod observers;
pub mod partition;
pub mod protocol;

// Re-export commonly used types for convenience
pub use constants::*;
pub use context::FetchContext;
pub use error::{FetchError, Result};
pub use observers::{
    Capabilities, Dispatch, Observer, ObserverFactory, ObserverRegistry, PartitionObserver,
    StreamObserver, TopicObserver,
};
pub use partition::{FetchPartition, Partition, PartitionEnd};
pub use protocol::{ByteStream, Message, MessageSet, Pull};
