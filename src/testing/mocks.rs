//! Mock collaborators for unit tests
//!
//! Observers that record what they were told, and a stream that fails
//! part-way through to simulate a dropped broker connection.

use std::io::{self, Cursor, Read};

use parking_lot::Mutex;

use crate::kafka::observers::{Observer, PartitionObserver, StreamObserver, TopicObserver};
use crate::kafka::partition::PartitionEnd;

/// A notification received by a [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    StreamEnd(String),
    TopicEnd(String),
    PartitionEnd(PartitionEnd),
}

/// Observer implementing every capability, recording each call in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObserverEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().clone()
    }

    pub fn partition_ends(&self) -> Vec<PartitionEnd> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::PartitionEnd(end) => Some(end.clone()),
                _ => None,
            })
            .collect()
    }
}

impl StreamObserver for RecordingObserver {
    fn on_stream_end(&self, stream_key: &str) {
        self.events
            .lock()
            .push(ObserverEvent::StreamEnd(stream_key.to_string()));
    }
}

impl TopicObserver for RecordingObserver {
    fn on_topic_end(&self, topic: &str) {
        self.events
            .lock()
            .push(ObserverEvent::TopicEnd(topic.to_string()));
    }
}

impl PartitionObserver for RecordingObserver {
    fn on_partition_end(&self, partition: &PartitionEnd) {
        self.events
            .lock()
            .push(ObserverEvent::PartitionEnd(partition.clone()));
    }
}

impl Observer for RecordingObserver {
    fn as_stream_observer(&self) -> Option<&dyn StreamObserver> {
        Some(self)
    }

    fn as_topic_observer(&self) -> Option<&dyn TopicObserver> {
        Some(self)
    }

    fn as_partition_observer(&self) -> Option<&dyn PartitionObserver> {
        Some(self)
    }
}

/// Observer that only handles stream end
#[derive(Debug, Default)]
pub struct StreamOnlyObserver {
    stream_keys: Mutex<Vec<String>>,
}

impl StreamOnlyObserver {
    pub fn stream_keys(&self) -> Vec<String> {
        self.stream_keys.lock().clone()
    }
}

impl StreamObserver for StreamOnlyObserver {
    fn on_stream_end(&self, stream_key: &str) {
        self.stream_keys.lock().push(stream_key.to_string());
    }
}

impl Observer for StreamOnlyObserver {
    fn as_stream_observer(&self) -> Option<&dyn StreamObserver> {
        Some(self)
    }
}

/// Observer advertising no capability at all
#[derive(Debug)]
pub struct NoCapabilityObserver;

impl Observer for NoCapabilityObserver {}

/// Stream that serves `data` but fails once `fail_after` bytes were read
pub struct FailingStream {
    data: Cursor<Vec<u8>>,
    fail_after: u64,
}

impl FailingStream {
    pub fn new(data: Vec<u8>, fail_after: usize) -> Self {
        FailingStream {
            data: Cursor::new(data),
            fail_after: fail_after as u64,
        }
    }
}

impl Read for FailingStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let position = self.data.position();
        if position >= self.fail_after {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "broker closed connection",
            ));
        }
        let allowed = ((self.fail_after - position) as usize).min(buf.len());
        self.data.read(&mut buf[..allowed])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kafka::protocol::ByteStream;

    #[test]
    fn test_failing_stream_fails_at_limit() {
        let mut stream = FailingStream::new(vec![1, 2, 3, 4], 2);
        assert_eq!(&stream.read_bytes(2).unwrap()[..], &[1, 2]);
        let err = stream.read_bytes(1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn test_recording_observer_orders_events() {
        let observer = RecordingObserver::default();
        observer.on_topic_end("a");
        observer.on_stream_end("b");
        assert_eq!(
            observer.events(),
            vec![
                ObserverEvent::TopicEnd("a".to_string()),
                ObserverEvent::StreamEnd("b".to_string()),
            ]
        );
    }
}
