// Kafka Fetch-response decoding module
//
// This module handles the binary message set format carried in each
// partition of a Fetch response:
// [4 bytes: Size (big-endian i32)] [Offset i64 | Length i32 | Payload]*
//
// Module organization:
// - stream: blocking byte source and big-endian integer reads
// - message: decoded record values
// - message_set: the truncation-tolerant record decoder

mod message;
mod message_set;
mod stream;

// Re-export public types
pub use message::{Message, Pull};
pub use message_set::MessageSet;
pub use stream::{read_i32, read_i64, ByteStream};
