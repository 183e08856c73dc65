//! Kafka Fetch-response constants
//!
//! This module centralizes the magic numbers used when decoding a message set.
//!
//! # Terminology
//! - **Message set**: `[size: i32] [record]*` for one partition in a Fetch response
//! - **Record header**: the fixed `[offset: i64] [length: i32]` prefix of each record

// ===== Wire Layout =====
// See: https://kafka.apache.org/protocol.html#protocol_message_sets

/// Size of a record's log offset field
pub const RECORD_OFFSET_SIZE: i32 = 8;

/// Size of a record's payload length field
pub const RECORD_LENGTH_SIZE: i32 = 4;

/// Fixed record header size (offset + length)
///
/// A message set with fewer than this many bytes left ends with a partial
/// header, which brokers produce when the fetch byte limit is reached.
pub const RECORD_HEADER_SIZE: i32 = RECORD_OFFSET_SIZE + RECORD_LENGTH_SIZE;

// ===== Configuration Defaults =====

/// Default upper bound for a declared message set size (bytes)
///
/// Matches the request size ceiling applied on the broker side (100MB).
pub const DEFAULT_MAX_MESSAGE_SET_SIZE: i32 = 100_000_000;

/// Smallest configurable message set ceiling: one empty record
pub const MIN_MAX_MESSAGE_SET_SIZE: i32 = RECORD_HEADER_SIZE;

/// Largest configurable message set ceiling
pub const MAX_MAX_MESSAGE_SET_SIZE: i32 = i32::MAX;

/// Truncation drains are logged at debug level unless enabled
pub const DEFAULT_LOG_TRUNCATION: bool = false;

// ===== Environment Variables =====

/// Overrides [`DEFAULT_MAX_MESSAGE_SET_SIZE`]
pub const ENV_MAX_MESSAGE_SET_SIZE: &str = "KAFKA_FETCH_MAX_MESSAGE_SET_SIZE";

/// Overrides [`DEFAULT_LOG_TRUNCATION`] (`true`/`false`/`1`/`0`)
pub const ENV_LOG_TRUNCATION: &str = "KAFKA_FETCH_LOG_TRUNCATION";
