use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::headers::HeaderMap;

/// Read a single line terminated by LF or by the end of stream.
///
/// The LF is consumed but not returned, a preceding CR is kept. A line longer than `max_len`,
/// not counting the CR, is consumed up to its LF and rejected with [`LineError::TooLong`].
pub fn read_line<R: BufRead + ?Sized>(src: &mut R, max_len: usize) -> Result<String, LineError> {
    // room for the CR
    let limit = max_len.saturating_add(1);
    let mut line = Vec::new();
    let mut overflow = false;

    loop {
        let buf = src.fill_buf()?;
        if buf.is_empty() {
            break;
        }

        let (chunk, done) = match buf.iter().position(|&e| e == b'\n') {
            Some(lf) => (&buf[..lf], Some(lf + 1)),
            None => (buf, None),
        };

        if !overflow {
            let room = limit - line.len();
            if chunk.len() > room {
                overflow = true;
                line.extend_from_slice(&chunk[..room]);
            } else {
                line.extend_from_slice(chunk);
            }
        }

        match done {
            Some(consumed) => {
                src.consume(consumed);
                break;
            }
            None => {
                let len = buf.len();
                src.consume(len);
            }
        }
    }

    let content_len = line.strip_suffix(b"\r").map_or(line.len(), <[u8]>::len);
    if overflow || content_len > max_len {
        return Err(LineError::TooLong);
    }

    match String::from_utf8(line) {
        Ok(ok) => Ok(ok),
        Err(err) => Ok(String::from_utf8_lossy(err.as_bytes()).into_owned()),
    }
}

/// Read header fields up to and including the blank line.
///
/// Name and value are trimmed, fields are appended in the received order.
pub fn read_headers<R: BufRead + ?Sized>(
    src: &mut R,
    headers: &mut HeaderMap,
    config: &Config,
) -> Result<(), LineError> {
    loop {
        let line = read_line(src, config.get_max_line_len())?;
        if line.trim().is_empty() {
            return Ok(());
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(LineError::MissingColon);
        };
        let name = name.trim();
        let value = value.trim();

        if name.is_empty() {
            return Err(LineError::EmptyName);
        }
        if value.is_empty() {
            return Err(LineError::EmptyValue);
        }
        if headers.len() >= config.get_max_headers() {
            return Err(LineError::TooManyHeaders);
        }

        headers.append(name, value);
    }
}

/// Write `text` followed by CRLF.
#[inline]
pub fn write_line<W: Write + ?Sized>(sink: &mut W, text: &str) -> io::Result<()> {
    sink.write_all(text.as_bytes())?;
    sink.write_all(b"\r\n")
}

/// Write header fields in insertion order followed by the blank line, then flush the sink.
pub fn write_headers<W: Write + ?Sized>(sink: &mut W, headers: &HeaderMap) -> io::Result<()> {
    for (name, value) in headers {
        sink.write_all(name.as_bytes())?;
        sink.write_all(b": ")?;
        write_line(sink, value)?;
    }
    sink.write_all(b"\r\n")?;
    sink.flush()
}

// ===== Error =====

/// Error when reading request lines.
#[derive(Debug)]
pub enum LineError {
    /// Underlying transport failure.
    Io(io::Error),
    /// Line exceeds the maximum length.
    TooLong,
    /// Header line without `:`.
    MissingColon,
    /// Header with empty name.
    EmptyName,
    /// Header with empty value.
    EmptyValue,
    /// Header count exceeds the maximum.
    TooManyHeaders,
}

impl LineError {
    /// Returns `true` if the peer violated the protocol, as opposed to a transport failure.
    #[inline]
    pub fn is_protocol(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

impl From<io::Error> for LineError {
    #[inline]
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(err) => err.fmt(f),
            Self::TooLong => f.write_str("line too long"),
            Self::MissingColon => f.write_str("header without colon"),
            Self::EmptyName => f.write_str("empty header name"),
            Self::EmptyValue => f.write_str("empty header value"),
            Self::TooManyHeaders => f.write_str("too many headers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line() {
        let mut src = &b"GET / HTTP/1.1\r\nHost: a\nlast"[..];
        assert_eq!(read_line(&mut src, 64).unwrap(), "GET / HTTP/1.1\r");
        assert_eq!(read_line(&mut src, 64).unwrap(), "Host: a");
        assert_eq!(read_line(&mut src, 64).unwrap(), "last");
        assert_eq!(read_line(&mut src, 64).unwrap(), "");
    }

    #[test]
    fn test_read_line_limit() {
        // CR not counted
        let mut src = &b"abcd\r\nabcde\r\nnext\n"[..];
        assert_eq!(read_line(&mut src, 4).unwrap(), "abcd\r");
        assert!(matches!(read_line(&mut src, 4), Err(LineError::TooLong)));
        // rest of the long line is consumed
        assert_eq!(read_line(&mut src, 4).unwrap(), "next");
    }

    #[test]
    fn test_read_line_small_buffer() {
        let data = b"a long line split over several buffer fills\r\nrest\n";
        let mut src = io::BufReader::with_capacity(4, &data[..]);
        assert_eq!(
            read_line(&mut src, 128).unwrap(),
            "a long line split over several buffer fills\r"
        );
        assert_eq!(read_line(&mut src, 128).unwrap(), "rest");

        let mut src = io::BufReader::with_capacity(4, &data[..]);
        assert!(matches!(read_line(&mut src, 8), Err(LineError::TooLong)));
        assert_eq!(read_line(&mut src, 8).unwrap(), "rest");
    }

    #[test]
    fn test_read_headers() {
        let mut src = &b"Host: example.com\r\ncontent-TYPE :  text/plain \r\nX-Empty-Key: a:b\r\n\r\nbody"[..];
        let mut headers = HeaderMap::new();
        read_headers(&mut src, &mut headers, &Config::default()).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("host"), Some("example.com"));
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(headers.get("x-empty-key"), Some("a:b"));
        assert_eq!(src, b"body");
    }

    #[test]
    fn test_read_headers_failures() {
        macro_rules! assert_fail {
            ($($input:literal => $err:path;)*) => {
                $(
                    let mut headers = HeaderMap::new();
                    let result = read_headers(&mut &$input[..], &mut headers, &Config::default());
                    assert!(matches!(result, Err($err)), "{:?}", result);
                )*
            };
        }

        assert_fail! {
            b"Host example.com\r\n\r\n" => LineError::MissingColon;
            b": value\r\n\r\n" => LineError::EmptyName;
            b"Host:   \r\n\r\n" => LineError::EmptyValue;
        }

        let config = Config::default().max_headers(1);
        let mut headers = HeaderMap::new();
        let result = read_headers(&mut &b"A: 1\r\nB: 2\r\n\r\n"[..], &mut headers, &config);
        assert!(matches!(result, Err(LineError::TooManyHeaders)));
        assert!(result.unwrap_err().is_protocol());
    }

    #[test]
    fn test_write_headers() {
        let mut headers = HeaderMap::new();
        headers.append("Server", "tinyweb");
        headers.append("Content-Length", "5");

        let mut out = Vec::new();
        write_line(&mut out, "HTTP/1.1 200 OK").unwrap();
        write_headers(&mut out, &headers).unwrap();
        assert_eq!(out, b"HTTP/1.1 200 OK\r\nServer: tinyweb\r\nContent-Length: 5\r\n\r\n");
    }
}
