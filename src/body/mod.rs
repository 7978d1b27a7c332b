//! HTTP Message Body.
//!
//! ## Transfer Codings
//!
//! - [`ChunkedDecoder`] and [`ChunkedEncoder`] for `Transfer-Encoding: chunked`
//! - [`BoundedReader`] and [`BoundedWriter`] for `Content-Length`
//!
//! ## Selection
//!
//! - [`BodyReader`] picks the decoder from message headers
//! - [`read_content`] collects a response body
mod chunked;
mod coder;
mod limited;
mod error;

pub use chunked::{ChunkedDecoder, MAX_CHUNK_SIZE};
pub use coder::ChunkedEncoder;
pub use limited::{BoundedReader, BoundedWriter};
pub use error::BodyError;

use std::io::{self, BufRead, BufReader, Cursor, Read};

use crate::headers::HeaderMap;
use crate::headers::standard::{CHUNKED, CONTENT_LENGTH, TRANSFER_ENCODING};

/// Number of bytes readable without blocking on the underlying source.
pub trait Available {
    fn available(&self) -> usize;
}

impl Available for &[u8] {
    #[inline]
    fn available(&self) -> usize {
        self.len()
    }
}

impl<T: AsRef<[u8]>> Available for Cursor<T> {
    #[inline]
    fn available(&self) -> usize {
        let len = self.get_ref().as_ref().len();
        len.saturating_sub(usize::try_from(self.position()).unwrap_or(len))
    }
}

impl<R> Available for BufReader<R> {
    #[inline]
    fn available(&self) -> usize {
        self.buffer().len()
    }
}

impl<T: Available + ?Sized> Available for &mut T {
    #[inline]
    fn available(&self) -> usize {
        T::available(self)
    }
}

/// Message body decoder selected from the message headers.
#[derive(Debug)]
pub enum BodyReader<R> {
    /// `Transfer-Encoding: chunked`.
    Chunked(ChunkedDecoder<R>),
    /// `Content-Length`.
    Limited(BoundedReader<R>),
    /// Delimited by the end of stream.
    ToEnd(R),
}

impl<R: BufRead> BodyReader<R> {
    /// Select the decoder of a response body.
    ///
    /// Without framing headers, or with a corrupt `Content-Length`, the body extends to the end
    /// of stream.
    pub fn response(src: R, headers: &HeaderMap) -> Self {
        if is_chunked(headers) {
            return Self::Chunked(ChunkedDecoder::new(src));
        }
        match content_length(headers) {
            Some(len) => Self::Limited(BoundedReader::new(src, len)),
            None => Self::ToEnd(src),
        }
    }

    /// Select the decoder of a request body.
    ///
    /// Without framing headers the request has no body.
    pub fn request(src: R, headers: &HeaderMap) -> Self {
        if is_chunked(headers) {
            return Self::Chunked(ChunkedDecoder::new(src));
        }
        Self::Limited(BoundedReader::new(src, content_length(headers).unwrap_or(0)))
    }

    /// Returns `true` if the body is known to be empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Limited(limited) => limited.remaining() == 0,
            Self::Chunked(chunked) => chunked.is_terminated(),
            Self::ToEnd(_) => false,
        }
    }

    /// Consume the rest of the body.
    pub fn drain(&mut self) -> io::Result<u64> {
        if self.is_empty() {
            return Ok(0);
        }
        io::copy(self, &mut io::sink())
    }
}

impl<R: BufRead> Read for BodyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Chunked(chunked) => chunked.read(buf),
            Self::Limited(limited) => limited.read(buf),
            Self::ToEnd(src) => src.read(buf),
        }
    }
}

impl<R: Available> Available for BodyReader<R> {
    fn available(&self) -> usize {
        match self {
            Self::Chunked(chunked) => chunked.available(),
            Self::Limited(limited) => limited.available(),
            Self::ToEnd(src) => src.available(),
        }
    }
}

/// Collect a response body framed by given headers.
pub fn read_content<R: BufRead>(src: R, headers: &HeaderMap) -> io::Result<Vec<u8>> {
    let mut body = BodyReader::response(src, headers);
    let mut out = Vec::with_capacity(content_length(headers).map_or(0, |e| e.min(64 * 1024) as usize));
    body.read_to_end(&mut out)?;
    Ok(out)
}

fn is_chunked(headers: &HeaderMap) -> bool {
    headers.has_token(TRANSFER_ENCODING, CHUNKED)
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(CONTENT_LENGTH)?.trim();
    if value.is_empty() || !value.bytes().all(|e| e.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use super::{read_content, BodyReader};
    use crate::headers::HeaderMap;

    fn headers(fields: &[(&str, &str)]) -> HeaderMap {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_read_content() {
        let map = headers(&[("Content-Length", "5")]);
        assert_eq!(read_content(&b"helloworld"[..], &map).unwrap(), b"hello");

        let map = headers(&[("transfer-encoding", "Chunked")]);
        assert_eq!(read_content(&b"2\r\nhi\r\n0\r\n\r\n"[..], &map).unwrap(), b"hi");

        let map = headers(&[("Content-Length", "5x")]);
        assert_eq!(read_content(&b"corrupt length"[..], &map).unwrap(), b"corrupt length");

        assert_eq!(read_content(&b"to the end"[..], &HeaderMap::new()).unwrap(), b"to the end");
    }

    #[test]
    fn test_request_body_selection() {
        let mut body = BodyReader::request(&b"GET / HTTP/1.1"[..], &HeaderMap::new());
        assert!(body.is_empty());
        let mut out = Vec::new();
        body.read_to_end(&mut out).unwrap();
        assert!(out.is_empty());

        let map = headers(&[("Content-Length", "4")]);
        let body = BodyReader::request(&b"data"[..], &map);
        assert!(matches!(body, BodyReader::Limited(_)));

        let map = headers(&[("Transfer-Encoding", "chunked")]);
        let body = BodyReader::request(&b"data"[..], &map);
        assert!(matches!(body, BodyReader::Chunked(_)));
    }

    #[test]
    fn test_drain() {
        let mut src = Cursor::new(&b"bodyNEXT"[..]);
        let map = headers(&[("Content-Length", "4")]);
        assert_eq!(BodyReader::request(&mut src, &map).drain().unwrap(), 4);
        assert_eq!(src.position(), 4);

        let mut src = Cursor::new(&b"3\r\nabc\r\n0\r\n\r\nNEXT"[..]);
        let map = headers(&[("Transfer-Encoding", "chunked")]);
        assert_eq!(BodyReader::request(&mut src, &map).drain().unwrap(), 3);
        assert_eq!(src.position(), 13);
    }
}
