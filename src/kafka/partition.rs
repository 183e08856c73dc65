// Partition collaborator for message set decoding
//
// A partition owns the stream its Fetch payload arrives on and the offset
// the consumer has committed. The decoder borrows it for the lifetime of
// one message set and writes the last decoded offset back on finalize.

use super::protocol::ByteStream;

/// A topic partition being fetched from
pub trait Partition {
    type Stream: ByteStream;

    /// Topic name
    fn topic(&self) -> &str;

    /// Partition index within the topic
    fn partition_id(&self) -> i32;

    /// The stream positioned at this partition's message set
    fn stream(&mut self) -> &mut Self::Stream;

    /// Commit the offset of the last fully decoded record
    fn set_message_offset(&mut self, offset: i64);
}

/// Snapshot passed to partition observers when a message set is exhausted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEnd {
    pub topic: String,
    pub partition: i32,
    /// Last decoded offset (None if the set yielded no records)
    pub offset: Option<i64>,
    /// Bytes of the set consumed by record headers and bodies
    pub consumed_bytes: i32,
}

/// Partition that owns its stream
///
/// This is the minimal partition state a fetch loop needs: identity, the
/// stream, and the committed offset.
#[derive(Debug)]
pub struct FetchPartition<S> {
    topic: String,
    partition_id: i32,
    stream: S,
    message_offset: Option<i64>,
}

impl<S: ByteStream> FetchPartition<S> {
    pub fn new(topic: impl Into<String>, partition_id: i32, stream: S) -> Self {
        FetchPartition {
            topic: topic.into(),
            partition_id,
            stream,
            message_offset: None,
        }
    }

    /// Last committed offset, if any set has committed one
    pub fn message_offset(&self) -> Option<i64> {
        self.message_offset
    }

    /// Release the stream, positioned wherever the last set left it
    pub fn into_stream(self) -> S {
        self.stream
    }
}

impl<S: ByteStream> Partition for FetchPartition<S> {
    type Stream = S;

    fn topic(&self) -> &str {
        &self.topic
    }

    fn partition_id(&self) -> i32 {
        self.partition_id
    }

    fn stream(&mut self) -> &mut S {
        &mut self.stream
    }

    fn set_message_offset(&mut self, offset: i64) {
        self.message_offset = Some(offset);
    }
}
