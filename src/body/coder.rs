use bytes::{BufMut, BytesMut};
use std::io::{self, Write};

use super::BodyError;
use crate::config::DEFAULT_CHUNK_CAPACITY;

/// Encoder of a `Transfer-Encoding: chunked` body.
///
/// Written bytes are collected into a fixed capacity buffer, every full buffer is emitted as a
/// single chunk. [`flush`][Write::flush] emits the pending bytes as a shorter chunk, it never
/// produces a zero sized chunk. [`complete`][ChunkedEncoder::complete] must be called to write
/// the terminal chunk.
#[derive(Debug)]
pub struct ChunkedEncoder<W> {
    inner: W,
    buffer: BytesMut,
    capacity: usize,
    complete: bool,
}

impl<W: Write> ChunkedEncoder<W> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, DEFAULT_CHUNK_CAPACITY)
    }

    /// Create new [`ChunkedEncoder`] that emits chunks of at most `capacity` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        assert!(capacity > 0, "chunk capacity must be non zero");
        Self {
            inner,
            buffer: BytesMut::with_capacity(capacity),
            capacity,
            complete: false,
        }
    }

    /// Returns the number of buffered bytes not yet emitted.
    #[inline]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer a single byte.
    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.ensure_writable()?;
        self.buffer.put_u8(byte);
        if self.buffer.len() == self.capacity {
            self.emit_chunk()?;
        }
        Ok(())
    }

    /// Emit pending bytes, then the terminal chunk.
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::AlreadyComplete`] if called twice.
    pub fn complete(&mut self) -> io::Result<()> {
        self.ensure_writable()?;
        self.emit_chunk()?;
        self.inner.write_all(b"0\r\n\r\n")?;
        self.complete = true;
        self.inner.flush()
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn ensure_writable(&self) -> io::Result<()> {
        if self.complete {
            return Err(BodyError::AlreadyComplete.into());
        }
        Ok(())
    }

    fn emit_chunk(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        write!(self.inner, "{:x}\r\n", self.buffer.len())?;
        self.inner.write_all(&self.buffer)?;
        self.inner.write_all(b"\r\n")?;
        self.buffer.clear();
        Ok(())
    }
}

impl<W: Write> Write for ChunkedEncoder<W> {
    fn write(&mut self, mut buf: &[u8]) -> io::Result<usize> {
        self.ensure_writable()?;
        let len = buf.len();

        while !buf.is_empty() {
            let n = (self.capacity - self.buffer.len()).min(buf.len());
            self.buffer.extend_from_slice(&buf[..n]);
            buf = &buf[n..];

            if self.buffer.len() == self.capacity {
                self.emit_chunk()?;
            }
        }

        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_writable()?;
        self.emit_chunk()?;
        self.inner.flush()
    }
}
