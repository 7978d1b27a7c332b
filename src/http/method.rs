/// HTTP Method.
///
/// Only the methods defined by HTTP/1.1 [RFC2616] without `CONNECT` are recognized, a request with
/// any other method token is rejected as `400 Bad Request`.
///
/// Method token is case-sensitive.
///
/// [RFC2616]: <https://www.rfc-editor.org/rfc/rfc2616#section-5.1.1>
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(u8);

// ===== Macros =====

macro_rules! methods {
    (
        $(
           $(#[$doc:meta])*
           pub const $name:ident = ($idx:literal, $val:literal);
        )*
    ) => {
        impl Method {
            $(
               $(#[$doc])*
               pub const $name: Self = Self($idx);
            )*

            /// Create [`Method`] from bytes.
            #[inline]
            pub const fn from_bytes(src: &[u8]) -> Option<Method> {
                match src {
                    $(
                        $val => Some(Self::$name),
                    )*
                    _ => None,
                }
            }

            /// Returns string representation of the method.
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self.0 {
                    $(
                        $idx => stringify!($name),
                    )*
                    _ => unreachable!(),
                }
            }
        }
    };
}

methods! {
    /// The `GET` method retrieves whatever information is identified by the request target.
    pub const GET = (0, b"GET");
    /// The `HEAD` method is identical to `GET` except that the server does not return a message
    /// body in the response.
    pub const HEAD = (1, b"HEAD");
    /// The `POST` method requests that the target accepts the enclosed entity.
    pub const POST = (2, b"POST");
    /// The `PUT` method requests that the enclosed entity be stored under the request target.
    pub const PUT = (3, b"PUT");
    /// The `DELETE` method requests that the origin server deletes the target resource.
    pub const DELETE = (4, b"DELETE");
    /// The `OPTIONS` method requests information about the communication options available.
    pub const OPTIONS = (5, b"OPTIONS");
    /// The `TRACE` method requests an application-level loop-back of the request message.
    pub const TRACE = (6, b"TRACE");
}

impl Method {
    /// Returns `true` if the response to this method carries the resource representation.
    #[inline]
    pub const fn is_retrieval(&self) -> bool {
        matches!(*self, Self::GET | Self::HEAD)
    }
}

impl std::str::FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or(UnknownMethod)
    }
}

impl std::fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Error =====

/// Error returned when parsing unrecognized method token.
pub struct UnknownMethod;

impl std::error::Error for UnknownMethod { }

impl std::fmt::Debug for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}

impl std::fmt::Display for UnknownMethod {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("unknown method")
    }
}
