//! HTTP Protocol.
mod method;
mod status;
mod version;
mod date;

pub mod uri;

pub use method::{Method, UnknownMethod};
#[doc(inline)]
pub use uri::Uri;
pub use version::Version;
pub use status::{Status, InvalidStatus, Outcome, SUBCODE_SEPARATOR};
pub use date::{httpdate, httpdate_now};
