//! Byte-at-a-time I/O contract.
//!
//! The downlink is half-duplex and callback-driven: the decoder never gets to
//! ask for "the next 256 bytes", only "give me one byte, or tell me there
//! isn't one right now, or tell me the link is gone". [`ByteSource`] and
//! [`ByteSink`] model exactly that, distinguishing a transient absence of
//! data ([`ReadOutcome::Timeout`]) from the stream actually ending
//! ([`ReadOutcome::Eof`]) at the type level, which `std::io::Read` does not.
use std::io::{self, ErrorKind, Read, Write};
use tracing::warn;

/// Result of a single `read_byte` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A byte was available.
    Byte(u8),
    /// No byte was available within whatever deadline the source enforces;
    /// callers should treat this as "try again", not as the end of the stream.
    Timeout,
    /// The source is exhausted and will never produce another byte.
    Eof,
}

/// A source of bytes, pulled one at a time.
pub trait ByteSource {
    fn read_byte(&mut self) -> ReadOutcome;
}

/// A sink for reassembled packet payload bytes.
///
/// `write_byte` returns `false` to signal that the sink can no longer accept
/// data (e.g. a downstream buffer is full or closed); the packet currently
/// being streamed is then abandoned and reported invalid.
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> bool;
}

/// Adapts any blocking [`std::io::Read`] into a [`ByteSource`].
///
/// Readers that support a read deadline (e.g. `TcpStream::set_read_timeout`)
/// should surface it as `ErrorKind::WouldBlock` or `ErrorKind::TimedOut`,
/// which this adapter maps to [`ReadOutcome::Timeout`]. Any other I/O error
/// has no representation in the three-outcome contract, so it is logged and
/// treated as [`ReadOutcome::Eof`].
pub struct IoByteSource<R> {
    inner: R,
    buf: [u8; 1],
}

impl<R: Read> IoByteSource<R> {
    pub fn new(inner: R) -> Self {
        IoByteSource { inner, buf: [0u8] }
    }
}

impl<R: Read> ByteSource for IoByteSource<R> {
    fn read_byte(&mut self) -> ReadOutcome {
        match self.inner.read(&mut self.buf) {
            Ok(0) => ReadOutcome::Eof,
            Ok(_) => ReadOutcome::Byte(self.buf[0]),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                ReadOutcome::Timeout
            }
            Err(err) => {
                warn!(error = %err, "read error has no timeout/eof representation, treating as eof");
                ReadOutcome::Eof
            }
        }
    }
}

/// Adapts any [`std::io::Write`] into a [`ByteSink`].
pub struct IoByteSink<W> {
    inner: W,
}

impl<W: Write> IoByteSink<W> {
    pub fn new(inner: W) -> Self {
        IoByteSink { inner }
    }
}

impl<W: Write> ByteSink for IoByteSink<W> {
    fn write_byte(&mut self, byte: u8) -> bool {
        self.inner.write_all(&[byte]).is_ok()
    }
}

/// Flushes the wrapped writer, surfacing any I/O error.
impl<W: Write> IoByteSink<W> {
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
