//! Filesystem adapters confined to capability directory handles.

mod cap_std_document_store;

pub use cap_std_document_store::CapStdDocumentStore;
