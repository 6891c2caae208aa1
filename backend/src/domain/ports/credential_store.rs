//! Driving port for password verification.
//!
//! Inbound adapters call it to check login attempts without knowing where the
//! hashed credentials are kept.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials};

use super::define_port_error;

define_port_error! {
    /// Errors raised while loading or consulting credentials.
    pub enum CredentialStoreError {
        /// The credential source could not be read.
        Read { message: String } => "credential source could not be read: {message}",
        /// The credential source is not a username to hash mapping.
        Malformed { message: String } => "credential source is malformed: {message}",
        /// The password check could not run to completion.
        Verification { message: String } => "password verification failed to run: {message}",
    }
}

impl From<CredentialStoreError> for Error {
    fn from(value: CredentialStoreError) -> Self {
        Self::internal(value.to_string())
    }
}

/// Username to password-hash lookup used at login.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return `true` only when the username is known and the password matches
    /// its stored hash. Unknown users yield `false`.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<bool, CredentialStoreError>;
}
