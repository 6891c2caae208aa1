//! Test utilities for the cms crate.
//!
//! Integration tests (in `tests/`) build the full application against a
//! temporary document root with a single known account. Only compiled with
//! the `test-support` feature.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use tempfile::TempDir;

use crate::Trace;
use crate::inbound::http::configure;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::{YamlCredentialStore, hash_password};
use crate::outbound::filesystem::CapStdDocumentStore;

/// Username of the fixture account.
pub const ADMIN_USERNAME: &str = "admin";
/// Password of the fixture account.
pub const ADMIN_PASSWORD: &str = "secret";

fn admin_hash() -> Result<&'static str, String> {
    static HASH: OnceLock<Result<String, String>> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).map_err(|error| error.to_string()))
        .as_deref()
        .map_err(Clone::clone)
}

/// Temporary document root plus the state wired to it.
pub struct TestWorkspace {
    root: TempDir,
    state: HttpState,
}

impl TestWorkspace {
    /// Create an empty document root and a credential store holding only
    /// the fixture account.
    ///
    /// # Errors
    /// Returns an I/O error if the directory cannot be created or the
    /// fixture password cannot be hashed.
    pub fn new() -> std::io::Result<Self> {
        let root = tempfile::tempdir()?;
        let documents = CapStdDocumentStore::open(root.path()).map_err(std::io::Error::other)?;
        let hash = admin_hash().map_err(std::io::Error::other)?;
        let credentials = YamlCredentialStore::from_entries([(ADMIN_USERNAME, hash)]);
        Ok(Self {
            root,
            state: HttpState::new(Arc::new(documents), Arc::new(credentials)),
        })
    }

    /// Path of the document root on disk.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write `content` to `name` directly, bypassing the HTTP surface.
    ///
    /// # Errors
    /// Propagates any write failure.
    pub fn seed(&self, name: &str, content: &[u8]) -> std::io::Result<()> {
        let dir = cap_std::fs::Dir::open_ambient_dir(self.root(), cap_std::ambient_authority())?;
        dir.write(name, content)
    }

    /// Read `name` directly from disk.
    ///
    /// # Errors
    /// Propagates any read failure, including a missing file.
    pub fn read(&self, name: &str) -> std::io::Result<Vec<u8>> {
        let dir = cap_std::fs::Dir::open_ambient_dir(self.root(), cap_std::ambient_authority())?;
        dir.read(name)
    }

    /// Build the application with the production routes and middleware.
    ///
    /// The session layer comes from [`SessionSettings::middleware`] with a
    /// fresh key. The cookie is not marked `Secure` so plain HTTP test
    /// requests carry it.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .wrap(session.middleware())
            .wrap(Trace)
            .configure(configure)
    }
}
