//! HTTP Headers.
//!
//! Header names keep the casing as received, lookup is case-insensitive.
mod field;
mod map;
mod iter;

pub use field::HeaderField;
pub use map::HeaderMap;
pub use iter::Iter;

/// Header names used by the engine.
pub mod standard {
    pub const HOST: &str = "Host";
    pub const CONNECTION: &str = "Connection";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
    pub const SERVER: &str = "Server";
    pub const DATE: &str = "Date";

    /// `Transfer-Encoding` value of chunked coding.
    pub const CHUNKED: &str = "chunked";
    /// `Connection` token requesting the connection to be closed.
    pub const CLOSE: &str = "close";
}

#[cfg(test)]
mod test;
