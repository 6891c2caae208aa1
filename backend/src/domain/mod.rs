//! Domain primitives, rules, and ports.
//!
//! Purpose: keep the document workflow free of HTTP and filesystem details.
//! Adapters in `inbound` and `outbound` depend on this module, never the
//! other way round.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure.
//! - [`LoginCredentials`] / [`Username`]: validated login input.
//! - [`validate_name`] / [`DocumentName`]: rules for new document names.
//! - [`render`] / [`DocumentKind`]: content rendering by extension.
//! - [`ports`]: traits implemented by storage adapters.

pub mod auth;
pub mod document;
pub mod error;
pub mod ports;
pub mod rendering;

pub use self::auth::{LoginCredentials, LoginValidationError, Username};
pub use self::document::{DocumentName, NameValidationError, validate_name};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::rendering::{DocumentKind, RenderedDocument, render};
