use bytes::{Buf, Bytes, BytesMut};
use std::io::{self, BufRead, Read};

use super::{Available, BodyError};

/// Maximum size of a single chunk.
pub const MAX_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum length of the chunk size hex token.
const MAX_SIZE_DIGITS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No chunk fetched yet.
    Initial,
    /// Current chunk buffer is served.
    Active,
    /// Terminal chunk found, end of stream is not reported yet.
    Terminated,
    /// End of stream reported.
    Exhausted,
}

/// Decoder of a `Transfer-Encoding: chunked` body.
///
/// ```not_rust
/// chunked-body   = *chunk
///                  last-chunk
///                  trailer-section
///                  CRLF
///
/// chunk          = chunk-size [ chunk-ext ] CRLF
///                  chunk-data CRLF
/// chunk-size     = 1*HEXDIG
/// last-chunk     = 1*("0") [ chunk-ext ] CRLF
/// ```
///
/// Chunk extensions and the trailer section are discarded. A single read may span multiple
/// chunks. After the end of stream is reported once, every further read returns
/// [`BodyError::Terminated`].
///
/// [rfc](https://www.rfc-editor.org/rfc/rfc9112.html#name-chunked-transfer-coding)
#[derive(Debug)]
pub struct ChunkedDecoder<R> {
    inner: R,
    chunk: Bytes,
    state: State,
}

impl<R: BufRead> ChunkedDecoder<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            chunk: Bytes::new(),
            state: State::Initial,
        }
    }

    /// Returns `true` if the terminal chunk has been read.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, State::Terminated | State::Exhausted)
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fetch_chunk(&mut self) -> io::Result<()> {
        let size = read_chunk_size(&mut self.inner)?;

        if size == 0 {
            skip_trailers(&mut self.inner)?;
            self.chunk = Bytes::new();
            self.state = State::Terminated;
            return Ok(());
        }

        if size > MAX_CHUNK_SIZE {
            return Err(BodyError::ChunkTooLarge.into());
        }

        let mut chunk = BytesMut::zeroed(size as usize);
        self.inner.read_exact(&mut chunk)?;
        // chunk data CRLF
        self.inner.skip_until(b'\n')?;

        self.chunk = chunk.freeze();
        self.state = State::Active;
        Ok(())
    }
}

impl<R: BufRead> Read for ChunkedDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.state {
            State::Exhausted => return Err(BodyError::Terminated.into()),
            State::Terminated => {
                self.state = State::Exhausted;
                return Ok(0);
            }
            State::Initial | State::Active => {}
        }

        if buf.is_empty() {
            return Ok(0);
        }

        let mut read = 0;

        loop {
            if !self.chunk.is_empty() {
                let n = self.chunk.len().min(buf.len() - read);
                buf[read..read + n].copy_from_slice(&self.chunk[..n]);
                self.chunk.advance(n);
                read += n;

                if read == buf.len() {
                    break;
                }
            }

            self.fetch_chunk()?;

            if self.state != State::Active {
                break;
            }
        }

        if read == 0 {
            // terminal chunk reached with nothing to return
            self.state = State::Exhausted;
        }

        Ok(read)
    }
}

impl<R: Available> Available for ChunkedDecoder<R> {
    fn available(&self) -> usize {
        match self.state {
            State::Active if self.chunk.is_empty() => self.inner.available(),
            State::Active => self.chunk.len(),
            _ => 0,
        }
    }
}

/// Read the hex size token, then discard the rest of the line.
fn read_chunk_size<R: BufRead>(src: &mut R) -> io::Result<u64> {
    let mut size = 0u64;
    let mut digits = 0;

    loop {
        let Some(&byte) = src.fill_buf()?.first() else {
            if digits == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            break;
        };
        let Some(digit) = char::from(byte).to_digit(16) else {
            break;
        };
        if digits == MAX_SIZE_DIGITS {
            return Err(BodyError::InvalidChunkSize.into());
        }

        size = size << 4 | u64::from(digit);
        digits += 1;
        src.consume(1);
    }

    if digits == 0 {
        return Err(BodyError::InvalidChunkSize.into());
    }

    // chunk extensions
    src.skip_until(b'\n')?;

    Ok(size)
}

/// Discard trailer fields up to and including the blank line.
///
/// Lines are skipped without buffering them.
fn skip_trailers<R: BufRead>(src: &mut R) -> io::Result<()> {
    loop {
        let blank = loop {
            let Some(&byte) = src.fill_buf()?.first() else {
                return Ok(());
            };
            match byte {
                b'\n' => break true,
                b' ' | b'\t' | b'\r' => src.consume(1),
                _ => break false,
            }
        };

        src.skip_until(b'\n')?;
        if blank {
            return Ok(());
        }
    }
}
