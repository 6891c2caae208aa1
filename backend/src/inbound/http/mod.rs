//! HTTP inbound adapter serving the document manager pages.

pub mod documents;
pub mod error;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use error::ApiResult;

use actix_web::web;

/// Register every route on `cfg`.
///
/// Fixed paths come first so `/new` and `/users/...` are never captured by
/// the `/{file}` patterns.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cms::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(documents::new_document_form)
        .service(documents::create_document)
        .service(documents::index)
        .service(documents::edit_form)
        .service(documents::update_document)
        .service(documents::delete_document)
        .service(documents::show_document);
}
