//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing::info;

use cms::Trace;
use cms::inbound::http::configure;

/// Construct an Actix HTTP server from the provided configuration.
///
/// Middleware order: [`Trace`] wraps the session layer so every response,
/// redirects included, carries a `trace-id` header.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        state,
    } = config;
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(session.middleware())
            .wrap(Trace)
            .configure(configure)
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
