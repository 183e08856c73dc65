// Fetch-response message set decoding
//
// Wire layout (all integers big-endian):
//
//   MessageSet := [size: i32] Record*
//   Record     := [offset: i64] [length: i32] [payload: length bytes]
//
// Brokers cap a Fetch response at the requested byte limit, so the last
// record of a set is routinely cut off, either inside its 12-byte header or
// inside its payload. The decoder treats both cases as a normal end of set
// and drains the leftover bytes, so the stream stays aligned on the next
// partition's data. Stream failures after construction end the set the same
// way. Only a bad size prefix is reported as an error.
//
// ## Lifecycle
//
// 1. `MessageSet::new` reads the size prefix
// 2. `pull` (or `Iterator::next`) decodes one record at a time
// 3. `finalize`, once EndOfSet was seen, commits the last offset to the partition and notifies
//    partition observers, exactly once

use std::io;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::super::constants::RECORD_HEADER_SIZE;
use super::super::context::FetchContext;
use super::super::error::{FetchError, Result};
use super::super::observers::Dispatch;
use super::super::partition::{Partition, PartitionEnd};
use super::message::{Message, Pull};
use super::stream::{read_i32, read_i64, ByteStream};
use crate::config::Config;

/// Pull-based decoder over one partition's message set
///
/// The set borrows its partition mutably, so only one decoder can read a
/// partition's stream at a time.
pub struct MessageSet<'a, P: Partition> {
    partition: &'a mut P,
    context: &'a FetchContext,
    config: Arc<Config>,
    declared_size: i32,
    /// Record header and payload bytes read so far, never above `declared_size`
    consumed_bytes: i32,
    last_offset: Option<i64>,
    current: Option<Message>,
    valid: bool,
    exhausted: bool,
    finalized: bool,
}

impl<'a, P: Partition> MessageSet<'a, P> {
    /// Read the size prefix from the partition's stream
    ///
    /// # Errors
    /// - `InvalidMessageSetSize` if the prefix is zero or negative
    /// - `MessageSetTooLarge` if the prefix exceeds `Config::max_message_set_size`
    /// - `Io` if the prefix cannot be read
    pub fn new(partition: &'a mut P, context: &'a FetchContext) -> Result<Self> {
        let config = context.config();
        let declared_size = read_i32(partition.stream())?;

        if declared_size <= 0 {
            return Err(FetchError::InvalidMessageSetSize(declared_size));
        }
        if declared_size > config.max_message_set_size {
            return Err(FetchError::MessageSetTooLarge {
                size: declared_size,
                max: config.max_message_set_size,
            });
        }

        debug!(
            "Message set for {}[{}]: {} bytes",
            partition.topic(),
            partition.partition_id(),
            declared_size
        );

        Ok(MessageSet {
            partition,
            context,
            config,
            declared_size,
            consumed_bytes: 0,
            last_offset: None,
            current: None,
            valid: false,
            exhausted: false,
            finalized: false,
        })
    }

    /// Decode the next record
    ///
    /// Never fails: truncation and stream errors both yield `Pull::EndOfSet`.
    /// Once `EndOfSet` is returned the stream is not touched again.
    pub fn pull(&mut self) -> Pull {
        if self.exhausted {
            return Pull::EndOfSet;
        }

        let pulled = match self.load_next() {
            Ok(pulled) => pulled,
            Err(e) => {
                warn!(
                    "Message set for {}[{}] interrupted after {} of {} bytes: {}",
                    self.partition.topic(),
                    self.partition.partition_id(),
                    self.consumed_bytes,
                    self.declared_size,
                    e
                );
                Pull::EndOfSet
            }
        };

        match &pulled {
            Pull::Record { message, .. } => {
                self.current = Some(message.clone());
                self.valid = true;
            }
            Pull::EndOfSet => {
                self.valid = false;
                self.exhausted = true;
            }
        }
        pulled
    }

    fn load_next(&mut self) -> io::Result<Pull> {
        if self.consumed_bytes >= self.declared_size {
            return Ok(Pull::EndOfSet);
        }

        let remaining = self.declared_size - self.consumed_bytes;
        if remaining < RECORD_HEADER_SIZE {
            self.drain_truncated(remaining, "record header")?;
            return Ok(Pull::EndOfSet);
        }

        let stream = self.partition.stream();
        let offset = read_i64(stream)?;
        let length = read_i32(stream)?;
        self.consumed_bytes += RECORD_HEADER_SIZE;

        // Written as a comparison against what is left so a hostile length
        // cannot overflow consumed_bytes
        let remaining = self.declared_size - self.consumed_bytes;
        if length < 0 || length > remaining {
            self.drain_truncated(remaining, "record body")?;
            return Ok(Pull::EndOfSet);
        }

        let payload = self.partition.stream().read_bytes(length as usize)?;
        self.consumed_bytes += length;
        self.last_offset = Some(offset);

        debug!("Decoded record offset={} length={}", offset, length);

        Ok(Pull::Record {
            offset,
            message: Message::new(payload),
        })
    }

    fn drain_truncated(&mut self, len: i32, part: &str) -> io::Result<()> {
        if self.config.log_truncation {
            info!(
                "Partial {} at end of message set for {}[{}], draining {} bytes",
                part,
                self.partition.topic(),
                self.partition.partition_id(),
                len
            );
        } else {
            debug!(
                "Partial {} at end of message set, draining {} bytes",
                part, len
            );
        }
        self.partition.stream().drain(len as usize)
    }

    /// Commit the last offset and notify partition observers
    ///
    /// Does nothing and returns `None` until `pull` has returned
    /// `EndOfSet`. After that only the first call has any effect; later
    /// calls return `None`. The offset is committed only if at least one
    /// record was decoded.
    pub fn finalize(&mut self) -> Option<Dispatch> {
        if !self.exhausted || self.finalized {
            return None;
        }
        self.finalized = true;

        if let Some(offset) = self.last_offset {
            self.partition.set_message_offset(offset);
        }

        let end = PartitionEnd {
            topic: self.partition.topic().to_string(),
            partition: self.partition.partition_id(),
            offset: self.last_offset,
            consumed_bytes: self.consumed_bytes,
        };
        debug!(
            "Finalized {}[{}] at offset {:?}",
            end.topic, end.partition, end.offset
        );
        Some(self.context.observers().notify_partition_end(&end))
    }

    pub fn declared_size(&self) -> i32 {
        self.declared_size
    }

    pub fn consumed_bytes(&self) -> i32 {
        self.consumed_bytes
    }

    /// Log offset of the last fully decoded record
    pub fn last_offset(&self) -> Option<i64> {
        self.last_offset
    }

    /// Most recently decoded message
    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    /// Whether the last pull produced a record
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

/// Yields `(offset, message)` pairs and finalizes the set when it runs out
impl<P: Partition> Iterator for MessageSet<'_, P> {
    type Item = (i64, Message);

    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Pull::Record { offset, message } => Some((offset, message)),
            Pull::EndOfSet => {
                self.finalize();
                None
            }
        }
    }
}
