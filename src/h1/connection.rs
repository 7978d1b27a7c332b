use std::io::{self, BufRead, Write};
use std::sync::Arc;

use super::parser::parse_request;
use crate::body::{BodyReader, BoundedWriter, ChunkedEncoder};
use crate::config::Config;
use crate::content::{Content, ContentProvider, InContent, OutContent};
use crate::headers::standard::{CHUNKED, CONTENT_TYPE, TRANSFER_ENCODING};
use crate::http::{Method, Outcome, Status, Uri};
use crate::log::{debug, info};
use crate::request::Request;
use crate::response::{Response, error_response};

/// Result of serving a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// Connection can serve another request.
    KeepAlive,
    /// Connection must be closed.
    Close,
}

enum Phase {
    AwaitRequest,
    Dispatch(Request),
    Respond(Request, Box<dyn OutContent>),
    RespondError(Request, Status),
    Cleanup(Request),
}

/// HTTP/1.x session over a single connection.
///
/// Requests are served strictly in sequence, the session ends when the peer closes the
/// connection, when a response requires the connection to be closed, or on transport failure.
pub struct Session<P: ?Sized, R, W> {
    reader: R,
    writer: W,
    provider: Arc<P>,
    config: Arc<Config>,
}

impl<P, R, W> Session<P, R, W>
where
    P: ContentProvider + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(reader: R, writer: W, provider: Arc<P>, config: Arc<Config>) -> Self {
        Self {
            reader,
            writer,
            provider,
            config,
        }
    }

    /// Serve requests until the connection is closed.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, protocol errors are responded to the peer instead.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.serve_one() {
                Ok(Cycle::KeepAlive) => {}
                Ok(Cycle::Close) => break,
                Err(err) => {
                    debug!("session terminated: {err}");
                    return Err(err);
                }
            }
        }
        self.writer.flush()
    }

    /// Serve a single request.
    pub fn serve_one(&mut self) -> io::Result<Cycle> {
        let mut phase = Phase::AwaitRequest;

        loop {
            phase = match phase {
                Phase::AwaitRequest => {
                    let Some(request) = parse_request(&mut self.reader, &self.config)? else {
                        return Ok(Cycle::Close);
                    };
                    match request.status().cloned() {
                        Some(status) => Phase::RespondError(request, status),
                        None => Phase::Dispatch(request),
                    }
                }
                Phase::Dispatch(request) => match self.dispatch(&request) {
                    Ok(content) => Phase::Respond(request, content),
                    Err(status) => Phase::RespondError(request, status),
                },
                Phase::Respond(request, content) => {
                    self.respond(&request, content.as_ref())?;
                    Phase::Cleanup(request)
                }
                Phase::RespondError(mut request, status) => {
                    request.reject(status);
                    self.respond_error(&request)?;
                    Phase::Cleanup(request)
                }
                Phase::Cleanup(request) => {
                    if !request.is_keep_alive() {
                        return Ok(Cycle::Close);
                    }
                    BodyReader::request(&mut self.reader, request.headers()).drain()?;
                    return Ok(Cycle::KeepAlive);
                }
            };
        }
    }

    /// Release the underlying streams.
    #[inline]
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn dispatch(&self, request: &Request) -> Outcome<Box<dyn OutContent>> {
        let Some(method) = request.method() else {
            return Err(Status::BAD_REQUEST);
        };

        match method {
            Method::GET | Method::HEAD => {
                let content = self.retrieve_out(request.target())?;
                if content.size() == 0 && !request.version().is_chunked_supported() {
                    return Err(Status::INTERNAL_SERVER_ERROR);
                }
                Ok(content)
            }
            Method::POST => {
                // request body handling is not supported yet
                let _content = self.retrieve_in(request.target())?;
                Err(Status::NOT_IMPLEMENTED)
            }
            _ => Err(Status::NOT_IMPLEMENTED),
        }
    }

    fn retrieve(&self, target: &Uri) -> Outcome<Content> {
        match self.provider.content(target)? {
            Some(content) => Ok(content),
            None => Err(Status::NOT_FOUND),
        }
    }

    fn retrieve_out(&self, target: &Uri) -> Outcome<Box<dyn OutContent>> {
        match self.retrieve(target)? {
            Content::Out(content) => Ok(content),
            Content::In(_) => Err(Status::METHOD_NOT_ALLOWED),
        }
    }

    fn retrieve_in(&self, target: &Uri) -> Outcome<Box<dyn InContent>> {
        match self.retrieve(target)? {
            Content::In(content) => Ok(content),
            Content::Out(_) => Err(Status::METHOD_NOT_ALLOWED),
        }
    }

    fn respond(&mut self, request: &Request, content: &dyn OutContent) -> io::Result<()> {
        let size = content.size();

        let mut res = Response::with_config(request.raw_version(), Status::OK, &self.config);
        res.headers_mut().append(CONTENT_TYPE, content.mimetype());
        if size > 0 {
            res.set_content_length(size);
        } else {
            res.headers_mut().append(TRANSFER_ENCODING, CHUNKED);
        }
        if !request.is_keep_alive() {
            res.set_close();
        }

        log_request(request, res.status());
        res.write_head(&mut self.writer)?;

        if request.method() == Some(Method::HEAD) {
            return Ok(());
        }

        if size > 0 {
            let mut body = BoundedWriter::new(&mut self.writer, size);
            content.write_to(&mut body)?;
            body.complete()
        } else {
            let capacity = self.config.get_chunk_capacity();
            let mut body = ChunkedEncoder::with_capacity(&mut self.writer, capacity);
            content.write_to(&mut body)?;
            body.complete()
        }
    }

    fn respond_error(&mut self, request: &Request) -> io::Result<()> {
        let status = request.status().cloned().unwrap_or(Status::INTERNAL_SERVER_ERROR);
        let (mut res, page) = error_response(request.version().as_str(), status, &self.config);
        if !request.is_keep_alive() {
            res.set_close();
        }

        log_request(request, res.status());
        res.write_head(&mut self.writer)?;

        if request.method() != Some(Method::HEAD) {
            self.writer.write_all(page.as_bytes())?;
        }
        self.writer.flush()
    }
}

#[cfg_attr(not(feature = "log"), allow(unused_variables))]
fn log_request(request: &Request, status: &Status) {
    info!(
        "{} {} {} {}",
        request.method().map_or("-", |e| e.as_str()),
        request.target(),
        request.raw_version(),
        status.code(),
    );
}

impl<P: ?Sized, R, W> std::fmt::Debug for Session<P, R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
