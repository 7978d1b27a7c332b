//! HTTP Request
use crate::{
    headers::{HeaderMap, standard::{CLOSE, CONNECTION}},
    http::{Method, Status, Uri, Version},
};

/// HTTP Request.
///
/// A request is produced even when parsing fails, in which case [`status`][Request::status]
/// holds the error to respond with. The status is set at most once, the first recorded error
/// wins.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: Option<Method>,
    target: Uri,
    version: Version,
    raw_version: String,
    headers: HeaderMap,
    status: Option<Status>,
}

/// Constructor
impl Request {
    /// Create [`Request`] with `/` target and `HTTP/1.1` version.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create [`Request`] with given parts.
    pub fn from_parts(method: Method, target: Uri, version: Version, headers: HeaderMap) -> Self {
        Self {
            method: Some(method),
            target,
            version,
            raw_version: version.as_str().to_owned(),
            headers,
            status: None,
        }
    }
}

impl Request {
    /// Returns the request method, or `None` if the method token is not recognized.
    #[inline]
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    #[inline]
    pub fn target(&self) -> &Uri {
        &self.target
    }

    /// Returns the protocol version the request is served with.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the version string as received, e.g: `HTTP/1.2`.
    #[inline]
    pub fn raw_version(&self) -> &str {
        &self.raw_version
    }

    accessor! {
        /// Returns shared reference to [`HeaderMap`].
        headers(),
        /// Returns mutable reference to [`HeaderMap`].
        headers_mut() -> HeaderMap;
    }

    /// Returns the error status recorded while handling the request.
    #[inline]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Returns `true` if no error is recorded.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.status.is_none()
    }

    /// Record an error status, unless one is already recorded.
    ///
    /// Returns `true` if the status is recorded.
    pub fn reject(&mut self, status: Status) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Returns `true` if the connection can serve another request after this one.
    ///
    /// A severe status, a version other than `HTTP/1.1`, or a `Connection: close` header close
    /// the connection.
    pub fn is_keep_alive(&self) -> bool {
        if self.status.as_ref().is_some_and(Status::is_severe) {
            return false;
        }
        if !self.version.is_keep_alive_default() {
            return false;
        }
        !self.headers.has_token(CONNECTION, CLOSE)
    }
}

/// Parser
impl Request {
    pub(crate) fn set_method(&mut self, method: Option<Method>) {
        self.method = method;
    }

    pub(crate) fn set_target(&mut self, target: Uri) {
        self.target = target;
    }

    pub(crate) fn set_version(&mut self, version: Version, raw: String) {
        self.version = version;
        self.raw_version = raw;
    }
}

// ===== Macros =====

macro_rules! accessor {
    (
        $(
            $(#[$rdoc:meta])*
            $mref:ident(),
            $(#[$mdoc:meta])*
            $mmut:ident() -> $ty:ty;
        )*
    ) => {
        $(
            $(#[$rdoc])*
            #[inline]
            pub fn $mref(&self) -> &$ty {
                &self.$mref
            }

            $(#[$mdoc])*
            #[inline]
            pub fn $mmut(&mut self) -> &mut $ty {
                &mut self.$mref
            }
        )*
    };
}

use {accessor};

#[cfg(test)]
mod tests {
    use super::Request;
    use crate::headers::HeaderMap;
    use crate::http::{Method, Status, Uri, Version};

    fn request(version: Version, connection: Option<&str>) -> Request {
        let mut headers = HeaderMap::new();
        headers.append("Host", "localhost");
        if let Some(value) = connection {
            headers.append("Connection", value);
        }
        Request::from_parts(Method::GET, Uri::root(), version, headers)
    }

    #[test]
    fn test_reject_once() {
        let mut req = Request::new();
        assert!(req.is_valid());
        assert!(req.reject(Status::NOT_FOUND));
        assert!(!req.reject(Status::BAD_REQUEST));
        assert_eq!(req.status(), Some(&Status::NOT_FOUND));
    }

    #[test]
    fn test_keep_alive() {
        assert!(request(Version::HTTP_11, None).is_keep_alive());
        assert!(request(Version::HTTP_11, Some("keep-alive")).is_keep_alive());
        assert!(!request(Version::HTTP_11, Some("Close")).is_keep_alive());
        assert!(!request(Version::HTTP_10, None).is_keep_alive());
        assert!(!request(Version::HTTP_10, Some("keep-alive")).is_keep_alive());

        let mut req = request(Version::HTTP_11, None);
        req.reject(Status::FORBIDDEN);
        assert!(req.is_keep_alive());

        let mut req = request(Version::HTTP_11, None);
        req.reject(Status::NOT_IMPLEMENTED);
        assert!(!req.is_keep_alive());
    }

    #[test]
    fn test_default_request() {
        let req = Request::new();
        assert_eq!(req.method(), None);
        assert_eq!(req.target().as_str(), "/");
        assert_eq!(req.version(), Version::HTTP_11);
        assert_eq!(req.raw_version(), "");
    }
}
