/// HTTP Version.
///
/// Only `HTTP/1.0` and `HTTP/1.1` are served. Any other `HTTP/1.x` minor version is served as
/// `HTTP/1.1`.
///
/// [rfc](https://www.rfc-editor.org/rfc/rfc2616#section-3.1)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version(Inner);

#[derive(PartialEq, PartialOrd, Copy, Clone, Eq, Ord, Hash)]
enum Inner {
    Http10,
    Http11,
}

impl Version {
    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version(Inner::Http10);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version(Inner::Http11);

    /// Resolve the version part of `HTTP/x.y`, e.g: `"1.1"`.
    ///
    /// Returns `None` if the version is not served.
    pub fn from_number(number: &str) -> Option<Version> {
        match number {
            "1.0" => Some(Self::HTTP_10),
            "1.1" => Some(Self::HTTP_11),
            // forward compatible minor versions
            n if n.starts_with("1.") => Some(Self::HTTP_11),
            _ => None,
        }
    }

    /// Returns `true` if the persistent connection is the default behavior.
    #[inline]
    pub const fn is_keep_alive_default(&self) -> bool {
        matches!(self.0, Inner::Http11)
    }

    /// Returns `true` if `Transfer-Encoding: chunked` is understood by this version.
    #[inline]
    pub const fn is_chunked_supported(&self) -> bool {
        matches!(self.0, Inner::Http11)
    }

    /// Returns string representation of HTTP version, e.g: `HTTP/1.1`
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Http10 => "HTTP/1.0",
            Inner::Http11 => "HTTP/1.1",
        }
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
