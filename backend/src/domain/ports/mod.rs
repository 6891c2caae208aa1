//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod document_store;

pub use credential_store::{CredentialStore, CredentialStoreError};
pub use document_store::{DocumentStore, DocumentStoreError, TrailingNewline};
