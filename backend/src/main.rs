//! Document manager entry-point: loads settings and stores, then serves HTTP.

mod server;

use std::sync::Arc;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cms::inbound::http::session_config::{BuildMode, session_settings_from_env};
use cms::inbound::http::state::HttpState;
use cms::outbound::credentials::YamlCredentialStore;
use cms::outbound::filesystem::CapStdDocumentStore;
use cms::settings::CmsSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CmsSettings::load_from_iter(std::env::args_os())
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    let bind_addr = settings.socket_addr().map_err(std::io::Error::other)?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let data_dir = &settings.data_dir;
    let documents = CapStdDocumentStore::open(data_dir).map_err(std::io::Error::other)?;
    let credentials =
        YamlCredentialStore::load(&settings.users_file).map_err(std::io::Error::other)?;
    info!(data_dir = %data_dir.display(), "document root ready");

    let state = HttpState::new(Arc::new(documents), Arc::new(credentials));
    create_server(ServerConfig::new(session, bind_addr, state))?.await
}
