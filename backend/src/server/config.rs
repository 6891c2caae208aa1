//! HTTP server configuration object.

use std::net::SocketAddr;

use cms::inbound::http::session_config::SessionSettings;
use cms::inbound::http::state::HttpState;

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) state: HttpState,
}

impl ServerConfig {
    /// Bundle session settings, listener address and handler state.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, state: HttpState) -> Self {
        Self {
            session,
            bind_addr,
            state,
        }
    }
}
