//! `DocumentStore` adapter backed by a `cap_std` directory handle.
//!
//! Every path is resolved relative to the root handle, so names such as
//! `../secret` or absolute paths fail instead of escaping the store.

use std::io::{self, Write as _};
use std::path::Path;

use async_trait::async_trait;
use cap_std::{
    ambient_authority,
    fs::{Dir, OpenOptions},
};
use tracing::{debug, warn};

use crate::domain::ports::{DocumentStore, DocumentStoreError, TrailingNewline};

/// Documents stored as flat files inside one directory.
#[derive(Debug)]
pub struct CapStdDocumentStore {
    root: Dir,
    trailing_newline: TrailingNewline,
}

impl CapStdDocumentStore {
    /// Open the store at `path`, creating the directory when it is missing.
    ///
    /// # Errors
    /// Returns [`DocumentStoreError::Io`] when the directory cannot be created
    /// or opened.
    ///
    /// # Examples
    /// ```
    /// use cms::outbound::filesystem::CapStdDocumentStore;
    ///
    /// let root = std::env::temp_dir().join("cms-doc-open-example");
    /// let store = CapStdDocumentStore::open(&root)?;
    /// # drop(store);
    /// # Ok::<(), cms::domain::ports::DocumentStoreError>(())
    /// ```
    pub fn open(path: &Path) -> Result<Self, DocumentStoreError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|error| {
            DocumentStoreError::io(format!("create {}: {error}", path.display()))
        })?;
        let root = Dir::open_ambient_dir(path, ambient_authority()).map_err(|error| {
            DocumentStoreError::io(format!("open {}: {error}", path.display()))
        })?;
        Ok(Self::from_dir(root))
    }

    /// Wrap an already opened directory handle.
    pub fn from_dir(root: Dir) -> Self {
        Self {
            root,
            trailing_newline: TrailingNewline::default(),
        }
    }

    /// Override how [`DocumentStore::write`] treats trailing newlines.
    #[must_use]
    pub fn with_trailing_newline(mut self, policy: TrailingNewline) -> Self {
        self.trailing_newline = policy;
        self
    }
}

fn map_io(name: &str, error: &io::Error) -> DocumentStoreError {
    if error.kind() == io::ErrorKind::NotFound {
        DocumentStoreError::not_found(name)
    } else {
        DocumentStoreError::io(format!("{name}: {error}"))
    }
}

#[async_trait]
impl DocumentStore for CapStdDocumentStore {
    async fn list(&self) -> Result<Vec<String>, DocumentStoreError> {
        let entries = self
            .root
            .entries()
            .map_err(|error| DocumentStoreError::io(format!("list root: {error}")))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|error| DocumentStoreError::io(format!("list root: {error}")))?;
            let is_file = entry
                .file_type()
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.starts_with('.') => {}
                Ok(name) => names.push(name),
                Err(raw) => warn!(name = ?raw, "skipping document with non UTF-8 name"),
            }
        }
        names.sort();
        Ok(names)
    }

    async fn exists(&self, name: &str) -> bool {
        self.root
            .metadata(name)
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentStoreError> {
        self.root.read(name).map_err(|error| map_io(name, &error))
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentStoreError> {
        let mut file = self
            .root
            .open_with(name, OpenOptions::new().write(true).create_new(true))
            .map_err(|error| match error.kind() {
                io::ErrorKind::AlreadyExists => DocumentStoreError::already_exists(name),
                _ => map_io(name, &error),
            })?;
        file.write_all(content)
            .map_err(|error| map_io(name, &error))?;
        debug!(document = name, bytes = content.len(), "document created");
        Ok(())
    }

    async fn write(&self, name: &str, content: &str) -> Result<(), DocumentStoreError> {
        let bytes = self.trailing_newline.apply(content);
        self.root
            .write(name, &bytes)
            .map_err(|error| map_io(name, &error))?;
        debug!(document = name, bytes = bytes.len(), "document written");
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), DocumentStoreError> {
        self.root
            .remove_file(name)
            .map_err(|error| map_io(name, &error))?;
        debug!(document = name, "document deleted");
        Ok(())
    }
}
