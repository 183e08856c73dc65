// Blocking byte source used by the message set decoder
//
// The decoder only ever needs "read exactly N bytes or fail" plus a way to
// discard bytes. Big-endian integers are decoded from the returned buffers
// with bytes::Buf, so no manual shifting happens here.

use std::io::{self, Read};

use bytes::{Buf, Bytes, BytesMut};

/// An ordered, blocking source of bytes
///
/// Every `std::io::Read` is a `ByteStream`, so sockets, files and in-memory
/// cursors can be handed to a partition directly.
pub trait ByteStream {
    /// Read exactly `len` bytes or fail
    fn read_bytes(&mut self, len: usize) -> io::Result<Bytes>;

    /// Discard exactly `len` bytes or fail
    fn drain(&mut self, len: usize) -> io::Result<()> {
        self.read_bytes(len).map(|_| ())
    }
}

impl<R: Read + ?Sized> ByteStream for R {
    fn read_bytes(&mut self, len: usize) -> io::Result<Bytes> {
        let mut buf = BytesMut::zeroed(len);
        self.read_exact(&mut buf)?;
        Ok(buf.freeze())
    }

    fn drain(&mut self, len: usize) -> io::Result<()> {
        // Copy into a sink so large drains never allocate `len` bytes
        let copied = io::copy(&mut Read::take(&mut *self, len as u64), &mut io::sink())?;
        if copied < len as u64 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("stream ended after {} of {} drained bytes", copied, len),
            ));
        }
        Ok(())
    }
}

/// Read a big-endian i32
pub fn read_i32<S: ByteStream + ?Sized>(stream: &mut S) -> io::Result<i32> {
    let mut buf = stream.read_bytes(4)?;
    Ok(buf.get_i32())
}

/// Read a big-endian i64
pub fn read_i64<S: ByteStream + ?Sized>(stream: &mut S) -> io::Result<i64> {
    let mut buf = stream.read_bytes(8)?;
    Ok(buf.get_i64())
}
