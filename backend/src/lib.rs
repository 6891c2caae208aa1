//! Flat-file document manager library.
//!
//! Layout follows ports and adapters: [`domain`] holds names, rendering and
//! the port traits; [`outbound`] implements those ports on the filesystem;
//! [`inbound`] exposes them over HTTP.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use middleware::Trace;
