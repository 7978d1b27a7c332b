//! Uniform Resource Identifier.
use std::ops::Range;

/// Uniform Resource Identifier of a request target.
///
/// A Uniform Resource Identifier ([URI](https://datatracker.ietf.org/doc/html/rfc3986)) provides a
/// simple and extensible means for identifying a resource.
///
/// ```not_rust
/// URI         = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
///
/// hier-part   = "//" authority path-abempty
///             / path-absolute
///             / path-rootless
///             / path-empty
/// ```
///
/// Parsing is lenient, it accepts absolute URI (`http://host/path`), origin form (`/path?query`),
/// the asterisk form (`*`) and relative references (`path/to`). Fragment is accepted but is not
/// part of [`path`][Uri::path] or [`query`][Uri::query].
///
/// ```not_rust
///   foo://example.com:8042/over/there?name=ferret#nose
///   \_/   \______________/\_________/ \_________/ \__/
///    |           |            |            |        |
/// scheme     authority       path        query   fragment
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Uri {
    value: String,
    // scheme end, point to `:`
    scheme: Option<usize>,
    authority: Option<Range<usize>>,
    // path start
    path: usize,
    // query start, point to either `?` or `end`
    query: usize,
    // fragment start, point to either `#` or end of string
    end: usize,
}

impl Uri {
    /// Parse [`Uri`] from string.
    ///
    /// # Errors
    ///
    /// Returns error if the input contains characters not allowed in URI, including whitespace,
    /// or an invalid percent-encoding.
    pub fn parse<S: Into<String>>(value: S) -> Result<Self, InvalidUri> {
        parse_uri(value.into())
    }

    /// Returns the `/` origin form.
    #[inline]
    pub fn root() -> Self {
        Self {
            value: String::from("/"),
            scheme: None,
            authority: None,
            path: 0,
            query: 1,
            end: 1,
        }
    }

    #[inline]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.map(|e| &self.value[..e])
    }

    #[inline]
    pub fn authority(&self) -> Option<&str> {
        self.authority.clone().map(|e| &self.value[e])
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.value[self.path..self.query]
    }

    #[inline]
    pub fn query(&self) -> Option<&str> {
        if self.query == self.end {
            None
        } else {
            Some(&self.value[self.query + 1..self.end])
        }
    }

    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        if self.end == self.value.len() {
            None
        } else {
            Some(&self.value[self.end + 1..])
        }
    }

    #[inline]
    pub fn path_and_query(&self) -> &str {
        &self.value[self.path..self.end]
    }

    /// Returns the URI as received.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Default for Uri {
    #[inline]
    fn default() -> Self {
        Self::root()
    }
}

impl std::str::FromStr for Uri {
    type Err = InvalidUri;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl std::fmt::Debug for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

// ===== Parser =====

/// ```not_rust
/// URI-reference = URI / relative-ref
/// relative-ref  = relative-part [ "?" query ] [ "#" fragment ]
/// ```
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-4.1)
fn parse_uri(value: String) -> Result<Uri, InvalidUri> {
    use InvalidUri::*;

    validate_chars(value.as_bytes())?;

    let buf = value.as_bytes();
    if buf.is_empty() {
        return Err(Incomplete);
    }

    let end = buf.iter().position(|&e| e == b'#').unwrap_or(buf.len());
    let body = &buf[..end];

    if body == b"*" {
        return Ok(Uri {
            value,
            scheme: None,
            authority: None,
            path: 0,
            query: end,
            end,
        });
    }

    let scheme = parse_scheme(body)?;
    let hier = scheme.map_or(0, |e| e + 1);

    let (authority, path) = match body[hier..].first_chunk::<2>() {
        Some(b"//") => {
            let start = hier + 2;
            let len = parse_authority(&body[start..]);
            (Some(start..start + len), start + len)
        }
        _ => (None, hier),
    };

    let query = path + parse_path(&body[path..]);

    Ok(Uri {
        value,
        scheme,
        authority,
        path,
        query,
        end,
    })
}

/// Reject characters that cannot appear in URI.
///
/// Non-ASCII characters are allowed.
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-2)
fn validate_chars(buf: &[u8]) -> Result<(), InvalidUri> {
    let mut fragment = false;
    let mut i = 0;

    while let Some(&byte) = buf.get(i) {
        match byte {
            b'%' => match buf.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 2,
                _ => return Err(InvalidUri::Escape),
            },
            b'#' if fragment => return Err(InvalidUri::Char('#')),
            b'#' => fragment = true,
            b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}' => {
                return Err(InvalidUri::Char(byte as char));
            }
            e if e <= b' ' || e == 0x7f => return Err(InvalidUri::Char(byte as char)),
            _ => {}
        }
        i += 1;
    }

    Ok(())
}

/// ```not_rust
/// scheme      = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
/// ```
///
/// terminated by `:` that comes before any `/` or `?`, returns the index of `:`, or `None` for
/// relative reference
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-3.1)
fn parse_scheme(buf: &[u8]) -> Result<Option<usize>, InvalidUri> {
    use InvalidUri::*;

    let Some(n) = buf.iter().position(|&e| matches!(e, b':' | b'/' | b'?')) else {
        return Ok(None);
    };
    if buf[n] != b':' {
        return Ok(None);
    }

    let scheme = &buf[..n];

    let Some(lead) = scheme.first() else {
        return Err(Incomplete);
    };
    if !lead.is_ascii_alphabetic() {
        return Err(Char(*lead as char));
    }
    if let Some(ch) = scheme
        .iter()
        .find(|e| !matches!(e, b'+' | b'-' | b'.') && !e.is_ascii_alphanumeric())
    {
        return Err(Char(*ch as char));
    }

    Ok(Some(n))
}

/// ```not_rust
/// authority   = [ userinfo "@" ] host [ ":" port ]
/// ```
///
/// terminated by `/`, `?`, or by the end
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-3.2)
fn parse_authority(buf: &[u8]) -> usize {
    buf.iter().position(|&e| matches!(e, b'/' | b'?')).unwrap_or(buf.len())
}

/// terminated by `?`, or by the end
///
/// [source](https://datatracker.ietf.org/doc/html/rfc3986#section-3.3)
fn parse_path(buf: &[u8]) -> usize {
    buf.iter().position(|&e| e == b'?').unwrap_or(buf.len())
}

// ===== Error =====

#[derive(Debug)]
pub enum InvalidUri {
    /// Bytes ends before all components parsed.
    Incomplete,
    /// Invalid character found.
    Char(char),
    /// Percent sign not followed by two hex digits.
    Escape,
}

impl std::error::Error for InvalidUri { }

impl std::fmt::Display for InvalidUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InvalidUri::*;
        f.write_str("invalid uri: ")?;
        match self {
            Incomplete => f.write_str("incomplete uri"),
            Char(ch) => write!(f, "unexpected character {ch:?}"),
            Escape => f.write_str("malformed percent encoding"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! assert_uri {
        (
            $rw:expr;
            $schema:expr, $auth:expr, $path:expr, $q:expr;
        ) => {
            let ok = Uri::parse($rw).unwrap();
            assert_eq!(ok.scheme(), $schema);
            assert_eq!(ok.authority(), $auth);
            assert_eq!(ok.path(), $path);
            assert_eq!(ok.query(), $q);
            assert_eq!(ok.as_str(), $rw);
        };
    }

    #[test]
    fn test_parse_uri() {
        assert_uri! {
            "/";
            None, None, "/", None;
        }

        assert_uri! {
            "/search?q=rust&lang=en";
            None, None, "/search", Some("q=rust&lang=en");
        }

        assert_uri! {
            "http://127.0.0.1:27888/normal";
            Some("http"), Some("127.0.0.1:27888"), "/normal", None;
        }

        assert_uri! {
            "https://example.com?";
            Some("https"), Some("example.com"), "", Some("");
        }

        assert_uri! {
            "http://[2001:db8::1]:8080/path";
            Some("http"), Some("[2001:db8::1]:8080"), "/path", None;
        }

        assert_uri! {
            "file:///etc/hosts";
            Some("file"), Some(""), "/etc/hosts", None;
        }

        assert_uri! {
            "/foo%20bar?name=John%20Doe";
            None, None, "/foo%20bar", Some("name=John%20Doe");
        }

        assert_uri! {
            "mailto:someone@example.com";
            Some("mailto"), None, "someone@example.com", None;
        }

        assert_uri! {
            "docs/index.html";
            None, None, "docs/index.html", None;
        }

        assert_uri! {
            "*";
            None, None, "*", None;
        }
    }

    #[test]
    fn test_parse_fragment() {
        let uri = Uri::parse("/page?a=1#section").unwrap();
        assert_eq!(uri.path(), "/page");
        assert_eq!(uri.query(), Some("a=1"));
        assert_eq!(uri.fragment(), Some("section"));
        assert_eq!(uri.path_and_query(), "/page?a=1");
    }

    #[test]
    fn test_parse_failures() {
        assert!(Uri::parse("").is_err());
        assert!(Uri::parse("://example.com").is_err());
        assert!(Uri::parse("1http://example.com").is_err());
        assert!(Uri::parse("/a b").is_err());
        assert!(Uri::parse("/a<b>").is_err());
        assert!(Uri::parse("/%zz").is_err());
        assert!(Uri::parse("/%2").is_err());
        assert!(Uri::parse("/a#b#c").is_err());
    }

    #[test]
    fn test_root() {
        let root = Uri::default();
        assert_eq!(root.path(), "/");
        assert_eq!(root.query(), None);
        assert_eq!(root.to_string(), "/");
    }
}
