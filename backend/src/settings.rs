//! Application settings loaded via OrthoConfig.
//!
//! Values come from `CMS_*` environment variables, matching command-line
//! flags, or a configuration file, with the defaults below when unset. Every
//! field has a default, so an empty environment still loads.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_USERS_FILE: &str = "./users.yml";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4567";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_users_file() -> PathBuf {
    PathBuf::from(DEFAULT_USERS_FILE)
}

/// Locations and listener address for the document manager.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CMS")]
pub struct CmsSettings {
    /// Directory holding the documents.
    #[ortho_config(default = default_data_dir())]
    pub data_dir: PathBuf,
    /// YAML mapping of usernames to Argon2 password hashes.
    #[ortho_config(default = default_users_file())]
    pub users_file: PathBuf,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
}

impl CmsSettings {
    /// Parse the configured bind address.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.trim().parse()
    }
}
