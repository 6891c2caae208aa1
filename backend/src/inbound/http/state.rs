//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without touching real storage.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, DocumentStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub documents: Arc<dyn DocumentStore>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use cms::inbound::http::state::HttpState;
    /// use cms::outbound::credentials::YamlCredentialStore;
    /// use cms::outbound::filesystem::CapStdDocumentStore;
    ///
    /// let root = tempfile::tempdir()?;
    /// let state = HttpState::new(
    ///     Arc::new(CapStdDocumentStore::open(root.path())?),
    ///     Arc::new(YamlCredentialStore::default()),
    /// );
    /// # let _ = state;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(documents: Arc<dyn DocumentStore>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            documents,
            credentials,
        }
    }
}
