//! HTTP Response
use bytes::{BufMut, BytesMut};
use std::io::{self, Write};

use crate::{
    config::Config,
    h1::line::{write_headers, write_line},
    headers::{HeaderMap, standard::{CLOSE, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, DATE, SERVER}},
    http::{Status, httpdate_now},
};

/// HTTP Response head.
#[derive(Debug, Clone)]
pub struct Response {
    version: String,
    status: Status,
    headers: HeaderMap,
}

impl Response {
    /// Create [`Response`] with given status line version and status.
    ///
    /// The version is written as given, so a success response can echo the request version.
    pub fn new(version: impl Into<String>, status: Status) -> Self {
        Self {
            version: version.into(),
            status,
            headers: HeaderMap::with_capacity(8),
        }
    }

    /// Create [`Response`] with `Server` and `Date` headers.
    pub fn with_config(version: impl Into<String>, status: Status, config: &Config) -> Self {
        let mut res = Self::new(version, status);
        res.headers.append(SERVER, config.get_server_name());
        res.headers.append(DATE, httpdate_now());
        res
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set `Content-Length` header.
    pub fn set_content_length(&mut self, len: u64) {
        self.headers.insert(CONTENT_LENGTH, itoa::Buffer::new().format(len));
    }

    /// Set `Connection: close` header.
    pub fn set_close(&mut self) {
        self.headers.insert(CONNECTION, CLOSE);
    }

    /// Write the status line and headers, then flush the sink.
    ///
    /// The head is buffered and handed to the sink in one write.
    pub fn write_head<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        let mut buf = BytesMut::with_capacity(256).writer();
        write_line(&mut buf, &format!("{} {}", self.version, self.status))?;
        write_headers(&mut buf, &self.headers)?;

        sink.write_all(buf.get_ref())?;
        sink.flush()
    }
}

/// Create the error page of given status.
///
/// ```
/// use tinyweb::{Status, response::error_page};
///
/// assert_eq!(
///     error_page(&Status::NOT_FOUND),
///     "<html><head><title>Error</title></head><body><h1>404 Not Found</h1></body></html>\r\n",
/// );
/// ```
pub fn error_page(status: &Status) -> String {
    format!("<html><head><title>Error</title></head><body><h1>{status}</h1></body></html>\r\n")
}

/// Create an error [`Response`] with its page.
///
/// The page is a `text/html` body of known length.
pub fn error_response(version: &str, status: Status, config: &Config) -> (Response, String) {
    let page = error_page(&status);
    let mut res = Response::with_config(version, status, config);
    res.headers.append(CONTENT_TYPE, "text/html");
    res.set_content_length(page.len() as u64);
    (res, page)
}
