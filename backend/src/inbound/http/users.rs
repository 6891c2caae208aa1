//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET  /users/login   sign-in form
//! POST /users/login   username=admin&password=secret
//! POST /users/logout
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::LoginCredentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents::redirect_home;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, PageContext};

/// Shown for a wrong password, an unknown user, or a blank field.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

/// Form body for `POST /users/login`.
///
/// Missing fields deserialize as empty strings, and an unreadable body counts
/// as an empty form, so both are rejected like any other bad attempt.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Render the sign-in form.
#[get("/users/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    let ctx = PageContext::from_session(&session)?;
    Ok(views::respond(StatusCode::OK, views::login_form(&ctx, "")))
}

/// Authenticate the user and establish a session.
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Result<web::Form<LoginForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let LoginForm { username, password } = form
        .map(web::Form::into_inner)
        .unwrap_or_else(|error| {
            warn!(%error, "unreadable login form");
            LoginForm::default()
        });
    let password = Zeroizing::new(password);

    let verified = match LoginCredentials::try_from_parts(&username, &password) {
        Ok(credentials) => {
            if state.credentials.verify(&credentials).await? {
                Some(credentials)
            } else {
                None
            }
        }
        Err(reason) => {
            warn!(%reason, "rejected malformed login attempt");
            None
        }
    };

    if let Some(credentials) = verified {
        session.persist_username(credentials.username())?;
        session.set_flash("Welcome!")?;
        info!(user = %credentials.username(), "user signed in");
        return Ok(redirect_home());
    }

    let ctx = PageContext::from_session(&session)?.with_flash(INVALID_CREDENTIALS_MESSAGE);
    Ok(views::respond(
        StatusCode::UNPROCESSABLE_ENTITY,
        views::login_form(&ctx, username.trim()),
    ))
}

/// End the session's login.
#[post("/users/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    let username = session.require_login()?;
    session.clear_username();
    session.set_flash("You have been signed out.")?;
    info!(user = %username, "user signed out");
    Ok(redirect_home())
}
