//! Port abstraction for the flat-file document store and its errors.
//!
//! Handlers depend on this trait only; the filesystem adapter lives in
//! `outbound::filesystem`.

use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// No document with this name exists in the store root.
        NotFound { name: String } => "{name} does not exist.",
        /// Something, visible in the listing or not, already occupies the name.
        AlreadyExists { name: String } => "{name} already exists.",
        /// The underlying storage failed for another reason.
        Io { message: String } => "document store I/O failed: {message}",
    }
}

impl From<DocumentStoreError> for Error {
    fn from(value: DocumentStoreError) -> Self {
        match value {
            DocumentStoreError::NotFound { .. } => Self::not_found(value.to_string()),
            DocumentStoreError::AlreadyExists { .. } => Self::invalid_request(value.to_string()),
            DocumentStoreError::Io { .. } => Self::internal(value.to_string()),
        }
    }
}

/// How [`DocumentStore::write`] treats the end of the submitted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingNewline {
    /// Append `\n` unless the content already ends with one.
    #[default]
    Append,
    /// Store the content exactly as submitted.
    Keep,
}

impl TrailingNewline {
    /// Apply the policy to `content`, returning the bytes to persist.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::ports::TrailingNewline;
    ///
    /// assert_eq!(TrailingNewline::Append.apply("update"), b"update\n");
    /// assert_eq!(TrailingNewline::Append.apply("done\n"), b"done\n");
    /// assert_eq!(TrailingNewline::Keep.apply("update"), b"update");
    /// ```
    pub fn apply(self, content: &str) -> Vec<u8> {
        let mut bytes = content.as_bytes().to_vec();
        if self == Self::Append && !content.ends_with('\n') {
            bytes.push(b'\n');
        }
        bytes
    }
}

/// Flat namespace of named documents under a single root.
///
/// Concurrent writers to the same name are not coordinated; the last write
/// wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Base names of the regular files in the root, sorted by name.
    async fn list(&self) -> Result<Vec<String>, DocumentStoreError>;

    /// Whether `name` refers to an existing document.
    async fn exists(&self, name: &str) -> bool;

    /// Raw content of `name`.
    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentStoreError>;

    /// Create `name` with `content`. Callers validate the name first.
    ///
    /// Never replaces anything already at `name`, including hidden files and
    /// directories that [`DocumentStore::list`] leaves out; those yield
    /// [`DocumentStoreError::AlreadyExists`].
    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentStoreError>;

    /// Replace the full content of `name`, applying the store's
    /// [`TrailingNewline`] policy. Creates the file when it is missing.
    async fn write(&self, name: &str, content: &str) -> Result<(), DocumentStoreError>;

    /// Remove `name`.
    async fn delete(&self, name: &str) -> Result<(), DocumentStoreError>;
}
