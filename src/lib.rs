// Module declarations for kafka_fetch
pub mod config; // Configuration (environment variables)
pub mod kafka; // Message set decoding, partitions and observers


pub use config::Config;
pub use kafka::{
    ByteStream, Dispatch, FetchContext, FetchError, FetchPartition, Message, MessageSet,
    Observer, ObserverRegistry, Partition, PartitionEnd, PartitionObserver, Pull, Result,
    StreamObserver, TopicObserver,
};
