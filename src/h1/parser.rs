//! HTTP/1.x request parser.
use std::io::{self, BufRead};

use super::line::{self, LineError};
use crate::config::Config;
use crate::headers::standard::HOST;
use crate::http::{Method, Status, Uri, Version};
use crate::request::Request;

/// Parse a request head from the source.
///
/// Returns `Ok(None)` if the source ends before the first byte of a request. Protocol errors do
/// not fail the call, they are recorded as `400 Bad Request` in the returned [`Request`] status.
///
/// # Errors
///
/// Returns error if the source fails while reading.
pub fn parse_request<R: BufRead + ?Sized>(
    src: &mut R,
    config: &Config,
) -> io::Result<Option<Request>> {
    if src.fill_buf()?.is_empty() {
        return Ok(None);
    }

    let mut request = Request::new();

    match line::read_line(src, config.get_max_line_len()) {
        Ok(reqline) => parse_reqline(reqline.trim_end_matches('\r'), &mut request),
        Err(LineError::Io(err)) => return Err(err),
        Err(_) => {
            request.reject(Status::BAD_REQUEST);
        }
    }

    match line::read_headers(src, request.headers_mut(), config) {
        Ok(()) => {}
        Err(LineError::Io(err)) => return Err(err),
        Err(_) => {
            request.reject(Status::BAD_REQUEST);
        }
    }

    if request.version() == Version::HTTP_11 && !request.headers().contains_key(HOST) {
        request.reject(Status::BAD_REQUEST);
    }

    Ok(Some(request))
}

/// ```not_rust
/// Request-Line   = Method SP Request-URI SP HTTP-Version CRLF
/// ```
fn parse_reqline(reqline: &str, request: &mut Request) {
    let mut tokens = reqline.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        request.reject(Status::BAD_REQUEST);
        return;
    };

    let method = Method::from_bytes(method.as_bytes());
    if method.is_none() {
        request.reject(Status::BAD_REQUEST);
    }
    request.set_method(method);

    match Uri::parse(target) {
        Ok(uri) => request.set_target(uri),
        Err(_) => {
            request.reject(Status::BAD_REQUEST);
        }
    }

    let resolved = version
        .split_once('/')
        .filter(|(protocol, _)| *protocol == "HTTP")
        .and_then(|(_, number)| Version::from_number(number));

    match resolved {
        Some(resolved) => request.set_version(resolved, version.to_owned()),
        None => {
            request.reject(Status::BAD_REQUEST);
            request.set_version(Version::HTTP_10, version.to_owned());
        }
    }
}
