//! Minimal HTTP/1.0 and HTTP/1.1 Server Engine
#![warn(missing_debug_implementations)]

mod log;

pub mod config;
pub mod http;
pub mod headers;
pub mod body;
pub mod request;
pub mod response;
pub mod content;
pub mod h1;
pub mod server;

pub use config::Config;
pub use content::{Content, ContentProvider, InContent, OutContent, StaticContent};
pub use http::{Method, Status, Uri, Version};
pub use request::Request;
pub use server::Server;
