//! HTTP/1.x Protocol.
//!
//! - [`line`] reads and writes protocol lines and header sections
//! - [`parser`] parses a request head into [`Request`][crate::Request]
//! - [`connection`] drives the request and response cycles of a connection
pub mod line;
pub mod parser;
pub mod connection;

pub use connection::{Cycle, Session};
pub use parser::parse_request;
