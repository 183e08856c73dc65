// Decoded message set values
//
// A Message is the raw payload of one record. Its internal layout (crc,
// magic byte, key/value framing, compression) is left to the caller.

use bytes::Bytes;

/// One record's payload, exactly as it appeared on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    payload: Bytes,
}

impl Message {
    /// Wrap raw payload bytes
    pub fn new(payload: Bytes) -> Self {
        Message { payload }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Take ownership of the payload buffer
    pub fn into_bytes(self) -> Bytes {
        self.payload
    }
}

impl From<Bytes> for Message {
    fn from(payload: Bytes) -> Self {
        Message::new(payload)
    }
}

/// Outcome of pulling one record from a message set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull {
    /// A complete record was decoded
    Record {
        /// Log offset assigned by the broker
        offset: i64,
        /// The record payload
        message: Message,
    },
    /// No more records: the set was fully consumed, truncated, or the stream failed
    EndOfSet,
}

impl Pull {
    pub fn is_end_of_set(&self) -> bool {
        matches!(self, Pull::EndOfSet)
    }
}
