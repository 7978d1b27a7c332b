use std::borrow::Cow;

/// Separator between a status code and its sub-code, e.g: `404.1`.
pub const SUBCODE_SEPARATOR: char = '.';

/// Result of a step that either produces a value or a response [`Status`].
pub type Outcome<T> = Result<T, Status>;

/// HTTP [Status][rfc].
///
/// A status is a code, optionally followed by a sub-code after [`SUBCODE_SEPARATOR`], and a
/// reason phrase. Known codes have a fixed reason phrase, other codes are named by their class,
/// e.g: `"404.1"` is a `"Client Error"`.
///
/// ```
/// use tinyweb::Status;
///
/// assert_eq!(Status::NOT_FOUND.to_string(), "404 Not Found");
/// assert_eq!(Status::new("404.1").to_string(), "404.1 Client Error");
/// assert_eq!(Status::new("404.1").status(), 404);
/// ```
///
/// [rfc]: <https://www.rfc-editor.org/rfc/rfc2616#section-6.1.1>
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Status {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    status: u16,
}

macro_rules! status_codes {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        impl Status {
            $(
                $(#[$doc])*
                pub const $id: Self = Self {
                    code: Cow::Borrowed(stringify!($int)),
                    message: Cow::Borrowed($msg),
                    status: $int,
                };
            )*
        }

        /// Reason phrase of the codes with fixed message.
        fn known_message(code: &str) -> Option<&'static str> {
            $(
                if code == stringify!($int) {
                    return Some($msg);
                }
            )*
            None
        }
    };
}

status_codes! {
    /// `100`. The client should continue with its request.
    100 CONTINUE "Continue";
    /// `200`. The request succeeded.
    200 OK "OK";
    /// `400`. The request could not be understood due to malformed syntax.
    400 BAD_REQUEST "Bad Request";
    /// `403`. The server understood the request, but is refusing to fulfill it.
    403 FORBIDDEN "Forbidden";
    /// `404`. The server has not found anything matching the request target.
    404 NOT_FOUND "Not Found";
    /// `405`. The method is not allowed for the resource identified by the request target.
    405 METHOD_NOT_ALLOWED "Method Not Allowed";
    /// `411`. The server refuses to accept the request without a defined `Content-Length`.
    411 LENGTH_REQUIRED "Length Required";
    /// `500`. The server encountered an unexpected condition which prevented it from fulfilling
    /// the request.
    500 INTERNAL_SERVER_ERROR "Internal Server Error";
    /// `501`. The server does not support the functionality required to fulfill the request.
    501 NOT_IMPLEMENTED "Not Implemented";
    /// `505`. The server does not support the HTTP protocol version used in the request.
    505 HTTP_VERSION_NOT_SUPPORTED "HTTP Version Not Supported";
}

/// Reason phrase derived from the hundreds digit.
const fn class_message(status: u16) -> Option<&'static str> {
    match status {
        100..=199 => Some("Informational"),
        200..=299 => Some("Success"),
        300..=399 => Some("Redirection"),
        400..=499 => Some("Client Error"),
        500..=599 => Some("Server Error"),
        _ => None,
    }
}

/// Parse the numeric part of a code, ignoring the sub-code.
fn parse_status(code: &str) -> Result<u16, InvalidStatus> {
    let base = match code.split_once(SUBCODE_SEPARATOR) {
        Some((base, _)) => base,
        None => code,
    };

    if base.is_empty() || !base.bytes().all(|e| e.is_ascii_digit()) {
        return Err(InvalidStatus::new(code));
    }

    match base.parse::<u16>() {
        Ok(status) if class_message(status).is_some() => Ok(status),
        _ => Err(InvalidStatus::new(code)),
    }
}

impl Status {
    /// Create [`Status`] from code, e.g: `"403"` or `"404.1"`.
    ///
    /// # Errors
    ///
    /// Returns error if the code is not numeric or outside the `1xx` to `5xx` classes.
    pub fn try_new<C: Into<Cow<'static, str>>>(code: C) -> Result<Self, InvalidStatus> {
        let code = code.into();
        let status = parse_status(&code)?;
        let message = match known_message(&code) {
            Some(message) => message,
            // checked by `parse_status`
            None => class_message(status).unwrap_or_default(),
        };
        Ok(Self {
            code,
            message: Cow::Borrowed(message),
            status,
        })
    }

    /// Create [`Status`] from code with custom reason phrase.
    ///
    /// # Errors
    ///
    /// Returns error if the code is not numeric or outside the `1xx` to `5xx` classes.
    pub fn try_with_message<C, M>(code: C, message: M) -> Result<Self, InvalidStatus>
    where
        C: Into<Cow<'static, str>>,
        M: Into<Cow<'static, str>>,
    {
        let code = code.into();
        let status = parse_status(&code)?;
        Ok(Self {
            code,
            message: message.into(),
            status,
        })
    }

    /// Create [`Status`] from code, e.g: `"403"` or `"404.1"`.
    ///
    /// # Panics
    ///
    /// Status outside `1xx` to `5xx` classes is a programming error, use [`Status::try_new`] for
    /// untrusted input.
    pub fn new<C: Into<Cow<'static, str>>>(code: C) -> Self {
        match Self::try_new(code) {
            Ok(ok) => ok,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the full code including sub-code, e.g: `"404.1"`.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the numeric status code without the sub-code, e.g: `404`.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the reason phrase, e.g: `"Not Found"`.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the status is `400` or any server error.
    ///
    /// A connection is never kept alive after a severe status.
    #[inline]
    pub const fn is_severe(&self) -> bool {
        self.status == 400 || self.status >= 500
    }

    /// Returns `true` for `2xx` status.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("Status").field(&format_args!("{self}")).finish()
    }
}

impl std::error::Error for Status { }

// ===== Error =====

/// Error when constructing [`Status`] with invalid code.
pub struct InvalidStatus {
    code: String,
}

impl InvalidStatus {
    fn new(code: &str) -> Self {
        Self { code: code.to_owned() }
    }
}

impl std::error::Error for InvalidStatus { }

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognised http status code: {:?}", self.code)
    }
}

impl std::fmt::Debug for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("InvalidStatus").field(&self.code).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Status;

    macro_rules! assert_status {
        ($($code:literal => $line:literal, $severe:literal;)*) => {
            $(
                let status = Status::new($code);
                assert_eq!(status.to_string(), $line);
                assert_eq!(status.is_severe(), $severe, "severity of {}", $code);
            )*
        };
    }

    #[test]
    fn test_status_catalog() {
        assert_status! {
            "100" => "100 Continue", false;
            "200" => "200 OK", false;
            "400" => "400 Bad Request", true;
            "403" => "403 Forbidden", false;
            "404" => "404 Not Found", false;
            "405" => "405 Method Not Allowed", false;
            "411" => "411 Length Required", false;
            "500" => "500 Internal Server Error", true;
            "501" => "501 Not Implemented", true;
            "505" => "505 HTTP Version Not Supported", true;
            "102" => "102 Informational", false;
            "204" => "204 Success", false;
            "302" => "302 Redirection", false;
            "418" => "418 Client Error", false;
            "503" => "503 Server Error", true;
            "404.1" => "404.1 Client Error", false;
            "400.2" => "400.2 Client Error", true;
        }
    }

    #[test]
    fn test_status_constants() {
        assert_eq!(Status::new("404"), Status::NOT_FOUND);
        assert_eq!(Status::NOT_IMPLEMENTED.status(), 501);
        assert_eq!(Status::FORBIDDEN.code(), "403");
        assert_eq!(Status::OK.message(), "OK");
        assert!(Status::OK.is_success());
        assert!(!Status::NOT_FOUND.is_success());
    }

    #[test]
    fn test_status_custom_message() {
        let status = Status::try_with_message("403.7", "Client Certificate Required").unwrap();
        assert_eq!(status.status(), 403);
        assert_eq!(status.to_string(), "403.7 Client Certificate Required");
        assert!(Status::try_with_message("700", "Nope").is_err());
    }

    #[test]
    fn test_status_invalid_class() {
        assert!(Status::try_new("600").is_err());
        assert!(Status::try_new("099").is_err());
        assert!(Status::try_new("abc").is_err());
        assert!(Status::try_new("").is_err());
        assert!(Status::try_new(".1").is_err());
        assert!(Status::try_new("+200").is_err());
    }

    #[test]
    #[should_panic]
    fn test_status_out_of_range_panics() {
        Status::new("999");
    }
}
