//! Server configuration.
use std::time::Duration;

/// Default value of the `Server` response header.
pub const DEFAULT_SERVER_NAME: &str = concat!("tinyweb/", env!("CARGO_PKG_VERSION"));

/// Default maximum length of a request line or a header line, excluding the line terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 4 * 1024;

/// Default maximum number of header fields in a request.
pub const DEFAULT_MAX_HEADERS: usize = 64;

/// Default capacity of a chunk emitted by [`ChunkedEncoder`][crate::body::ChunkedEncoder].
pub const DEFAULT_CHUNK_CAPACITY: usize = 512;

/// Per server configuration, shared by every connection.
///
/// ```
/// use tinyweb::Config;
///
/// let config = Config::default()
///     .server_name("example")
///     .max_line_len(1024);
///
/// assert_eq!(config.get_server_name(), "example");
/// assert_eq!(config.get_max_line_len(), 1024);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    server_name: String,
    max_line_len: usize,
    max_headers: usize,
    chunk_capacity: usize,
    read_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_owned(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_headers: DEFAULT_MAX_HEADERS,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            read_timeout: None,
        }
    }
}

impl Config {
    /// Set the `Server` response header value.
    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Set the maximum line length, lines exceeding it are rejected as `400 Bad Request`.
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.max_line_len = len;
        self
    }

    /// Set the maximum number of request headers.
    pub fn max_headers(mut self, count: usize) -> Self {
        self.max_headers = count;
        self
    }

    /// Set the chunk capacity used for responses of unknown size.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn chunk_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "chunk capacity must be non zero");
        self.chunk_capacity = capacity;
        self
    }

    /// Set how long a connection may stay silent while a request is awaited or read.
    ///
    /// An idle connection exceeding it is closed. `None`, the default, waits indefinitely.
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    #[inline]
    pub fn get_server_name(&self) -> &str {
        &self.server_name
    }

    #[inline]
    pub fn get_max_line_len(&self) -> usize {
        self.max_line_len
    }

    #[inline]
    pub fn get_max_headers(&self) -> usize {
        self.max_headers
    }

    #[inline]
    pub fn get_chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    #[inline]
    pub fn get_read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}
