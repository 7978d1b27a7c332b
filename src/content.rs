//! Content provider contract.
//!
//! A [`ContentProvider`] resolves a request target into a [`Content`], either an [`OutContent`]
//! that is written to the peer, or an [`InContent`] that reads the request body.
use bytes::Bytes;
use std::io::{self, Read, Write};

use crate::http::{Status, Uri};

/// Resolver of request targets, shared by every connection.
pub trait ContentProvider: Send + Sync {
    /// Returns the content of given target.
    ///
    /// `Ok(None)` is responded as `404 Not Found`, an `Err` status is responded verbatim.
    fn content(&self, target: &Uri) -> Result<Option<Content>, Status>;
}

impl<P: ContentProvider + ?Sized> ContentProvider for std::sync::Arc<P> {
    #[inline]
    fn content(&self, target: &Uri) -> Result<Option<Content>, Status> {
        P::content(self, target)
    }
}

impl<P: ContentProvider + ?Sized> ContentProvider for Box<P> {
    #[inline]
    fn content(&self, target: &Uri) -> Result<Option<Content>, Status> {
        P::content(self, target)
    }
}

/// Resolved content of a request target.
pub enum Content {
    /// Content to be read by the peer.
    Out(Box<dyn OutContent>),
    /// Content to be written by the peer.
    In(Box<dyn InContent>),
}

impl Content {
    /// Create [`Content::Out`].
    #[inline]
    pub fn out<C: OutContent + 'static>(content: C) -> Self {
        Self::Out(Box::new(content))
    }

    /// Create [`Content::In`].
    #[inline]
    pub fn input<C: InContent + 'static>(content: C) -> Self {
        Self::In(Box::new(content))
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Out(out) => f
                .debug_struct("Out")
                .field("mimetype", &out.mimetype())
                .field("size", &out.size())
                .finish(),
            Self::In(_) => f.write_str("In"),
        }
    }
}

/// Content served to the peer.
pub trait OutContent: Send {
    /// Returns the `Content-Type` of the content.
    fn mimetype(&self) -> &str;

    /// Returns the content length in bytes, `0` if unknown.
    ///
    /// Content of unknown length is sent chunked, which requires `HTTP/1.1`.
    fn size(&self) -> u64;

    /// Write the content into the body sink.
    fn write_to(&self, sink: &mut dyn Write) -> io::Result<()>;
}

/// Content received from the peer.
pub trait InContent: Send {
    /// Read the content from the body source.
    fn read_from(&self, src: &mut dyn Read) -> io::Result<()>;
}

// ===== FromFn =====

/// Create [`ContentProvider`] from a function.
///
/// ```
/// use tinyweb::{Content, StaticContent, content::from_fn};
///
/// let provider = from_fn(|target| match target.path() {
///     "/" => Ok(Some(Content::out(StaticContent::new("text/plain", "hello")))),
///     _ => Ok(None),
/// });
/// # let _ = provider;
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Uri) -> Result<Option<Content>, Status> + Send + Sync,
{
    FromFn { f }
}

/// Function [`ContentProvider`], created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> ContentProvider for FromFn<F>
where
    F: Fn(&Uri) -> Result<Option<Content>, Status> + Send + Sync,
{
    #[inline]
    fn content(&self, target: &Uri) -> Result<Option<Content>, Status> {
        (self.f)(target)
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

// ===== StaticContent =====

/// [`OutContent`] of an in memory body.
#[derive(Debug, Clone)]
pub struct StaticContent {
    mimetype: &'static str,
    body: Bytes,
    sized: bool,
}

impl StaticContent {
    /// Create [`StaticContent`] with `Content-Length`.
    pub fn new(mimetype: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            mimetype,
            body: body.into(),
            sized: true,
        }
    }

    /// Create [`StaticContent`] that reports unknown size, sent chunked.
    pub fn unknown_size(mimetype: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            mimetype,
            body: body.into(),
            sized: false,
        }
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl OutContent for StaticContent {
    #[inline]
    fn mimetype(&self) -> &str {
        self.mimetype
    }

    #[inline]
    fn size(&self) -> u64 {
        if self.sized { self.body.len() as u64 } else { 0 }
    }

    #[inline]
    fn write_to(&self, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self.body)
    }
}
