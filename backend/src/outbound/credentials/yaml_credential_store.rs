//! `CredentialStore` adapter reading a YAML users file.
//!
//! ```yaml
//! admin: $argon2id$v=19$m=19456,t=2,p=1$...
//! ```
//!
//! The file is read once when the store is built; edits require a restart.
//! Argon2 checks run on the blocking pool so they never stall a worker.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::LoginCredentials;
use crate::domain::ports::{CredentialStore, CredentialStoreError};

use super::password::verify_password;

/// Username to Argon2 PHC hash mapping loaded from YAML.
#[derive(Debug, Clone, Default)]
pub struct YamlCredentialStore {
    hashes: HashMap<String, String>,
}

impl YamlCredentialStore {
    /// Load the users file at `path`.
    ///
    /// # Errors
    /// [`CredentialStoreError::Read`] when the file cannot be read and
    /// [`CredentialStoreError::Malformed`] when it is not a string mapping.
    pub fn load(path: &Path) -> Result<Self, CredentialStoreError> {
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            CredentialStoreError::read(format!("{} has no file name", path.display()))
        })?;
        let contents = Dir::open_ambient_dir(parent, ambient_authority())
            .and_then(|dir| dir.read_to_string(file_name))
            .map_err(|error| CredentialStoreError::read(format!("{}: {error}", path.display())))?;
        let store = Self::from_yaml(&contents)?;
        if store.is_empty() {
            warn!(path = %path.display(), "users file has no entries; nobody can sign in");
        }
        info!(path = %path.display(), users = store.len(), "credentials loaded");
        Ok(store)
    }

    /// Parse a YAML mapping of usernames to hashes.
    ///
    /// An empty document yields a store with no users.
    ///
    /// # Examples
    /// ```
    /// use cms::outbound::credentials::YamlCredentialStore;
    ///
    /// let store = YamlCredentialStore::from_yaml("admin: $argon2id$v=19$placeholder\n")?;
    /// assert_eq!(store.len(), 1);
    /// # Ok::<(), cms::domain::ports::CredentialStoreError>(())
    /// ```
    pub fn from_yaml(contents: &str) -> Result<Self, CredentialStoreError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let hashes: HashMap<String, String> = serde_yaml::from_str(contents)
            .map_err(|error| CredentialStoreError::malformed(error.to_string()))?;
        Ok(Self { hashes })
    }

    /// Build a store from already hashed entries.
    pub fn from_entries<I, U, H>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            hashes: entries
                .into_iter()
                .map(|(user, hash)| (user.into(), hash.into()))
                .collect(),
        }
    }

    /// Number of configured users.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether no users are configured.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[async_trait]
impl CredentialStore for YamlCredentialStore {
    async fn verify(&self, credentials: &LoginCredentials) -> Result<bool, CredentialStoreError> {
        let username = credentials.username().as_ref();
        let Some(stored) = self.hashes.get(username) else {
            return Ok(false);
        };
        let stored = stored.clone();
        let password = Zeroizing::new(credentials.password().to_owned());
        let outcome = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|error| CredentialStoreError::verification(error.to_string()))?;
        match outcome {
            Ok(matches) => Ok(matches),
            Err(error) => {
                warn!(user = username, %error, "ignoring unusable password hash");
                Ok(false)
            }
        }
    }
}
