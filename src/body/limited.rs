use std::io::{self, Read, Write};

use super::Available;
use crate::log::warning;

/// Reader that yields at most a fixed number of bytes from the underlying source.
///
/// Once the limit is spent the reader reports end of stream, regardless of what remains in the
/// source.
#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    limit: i64,
}

impl<R> BoundedReader<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Self {
            inner,
            limit: i64::try_from(limit).unwrap_or(i64::MAX),
        }
    }

    /// Returns the number of bytes left before the limit.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.limit.max(0) as u64
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.limit <= 0 || buf.is_empty() {
            return Ok(0);
        }

        let max = buf.len().min(usize::try_from(self.limit).unwrap_or(usize::MAX));
        let read = self.inner.read(&mut buf[..max])?;
        self.limit -= read as i64;
        Ok(read)
    }
}

impl<R> Available for BoundedReader<R> {
    #[inline]
    fn available(&self) -> usize {
        usize::try_from(self.remaining()).unwrap_or(usize::MAX)
    }
}

/// Writer that forwards at most a declared number of bytes.
///
/// Bytes beyond the declared length are dropped with a warning, [`complete`][Self::complete]
/// pads a short body with zeros, so the sink always receives exactly the declared length.
#[derive(Debug)]
pub struct BoundedWriter<W> {
    inner: W,
    limit: i64,
}

impl<W: Write> BoundedWriter<W> {
    pub fn new(inner: W, limit: u64) -> Self {
        Self {
            inner,
            limit: i64::try_from(limit).unwrap_or(i64::MAX),
        }
    }

    /// Returns the number of bytes still expected.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.limit.max(0) as u64
    }

    /// Pad the remaining declared length with zero bytes, then flush the sink.
    pub fn complete(&mut self) -> io::Result<()> {
        const ZEROS: [u8; 512] = [0; 512];

        if self.limit > 0 {
            warning!("body shorter than declared length, padding {} bytes", self.limit);

            while self.limit > 0 {
                let n = ZEROS.len().min(usize::try_from(self.limit).unwrap_or(usize::MAX));
                self.inner.write_all(&ZEROS[..n])?;
                self.limit -= n as i64;
            }
        }
        self.inner.flush()
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for BoundedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let allowed = usize::try_from(self.limit.max(0)).unwrap_or(usize::MAX);
        let n = buf.len().min(allowed);
        if n < buf.len() {
            warning!("body exceeds declared length, dropping {} bytes", buf.len() - n);
        }

        self.inner.write_all(&buf[..n])?;
        self.limit = self.limit.saturating_sub(i64::try_from(buf.len()).unwrap_or(i64::MAX));
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use super::{BoundedReader, BoundedWriter};
    use crate::body::Available;

    #[test]
    fn test_bounded_reader() {
        let mut reader = BoundedReader::new(&b"Hello World"[..], 5);
        assert_eq!(reader.available(), 5);

        let mut buf = [0u8; 3];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"Hel");
        assert_eq!(reader.remaining(), 2);

        let mut buf = [0u8; 16];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.into_inner(), b" World");
    }

    #[test]
    fn test_bounded_reader_short_source() {
        let mut reader = BoundedReader::new(&b"abc"[..], 10);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abc");
        assert_eq!(reader.remaining(), 7);
    }

    #[test]
    fn test_bounded_writer_exact() {
        let mut writer = BoundedWriter::new(Vec::new(), 5);
        writer.write_all(b"Hello").unwrap();
        writer.complete().unwrap();
        assert_eq!(writer.into_inner(), b"Hello");
    }

    #[test]
    fn test_bounded_writer_overflow() {
        let mut writer = BoundedWriter::new(Vec::new(), 4);
        assert_eq!(writer.write(b"abc").unwrap(), 3);
        assert_eq!(writer.write(b"defg").unwrap(), 4);
        assert_eq!(writer.write(b"h").unwrap(), 1);
        assert_eq!(writer.remaining(), 0);
        writer.complete().unwrap();
        assert_eq!(writer.into_inner(), b"abcd");
    }

    #[test]
    fn test_bounded_writer_padding() {
        let mut writer = BoundedWriter::new(Vec::new(), 1030);
        writer.write_all(b"xy").unwrap();
        writer.complete().unwrap();

        let out = writer.into_inner();
        assert_eq!(out.len(), 1030);
        assert_eq!(&out[..2], b"xy");
        assert!(out[2..].iter().all(|&e| e == 0));
    }
}
