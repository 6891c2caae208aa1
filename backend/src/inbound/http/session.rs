//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with two fields: the
//! logged-in username and a one-shot flash message.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const FLASH_KEY: &str = "flash";

/// Flash shown when an anonymous session reaches a guarded endpoint.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to do that.";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `username` as logged in.
    pub fn persist_username(&self, username: &Username) -> Result<(), Error> {
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the logged-in user, leaving any flash in place.
    pub fn clear_username(&self) {
        let _ = self.0.remove(USERNAME_KEY);
    }

    /// Fetch the logged-in username, if any.
    ///
    /// A blank value in the cookie is treated as anonymous.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|value| match Username::new(&value) {
            Ok(username) => Some(username),
            Err(error) => {
                tracing::warn!("invalid username in session cookie: {error}");
                None
            }
        }))
    }

    /// Guard for state-changing and sensitive endpoints.
    ///
    /// Anonymous sessions get the login-required flash and an
    /// [`crate::domain::ErrorCode::Unauthorized`] error, which the HTTP error
    /// mapping turns into a redirect to the document list.
    pub fn require_login(&self) -> Result<Username, Error> {
        match self.username()? {
            Some(username) => Ok(username),
            None => {
                self.set_flash(LOGIN_REQUIRED_MESSAGE)?;
                Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE))
            }
        }
    }

    /// Store a message for the next rendered page, replacing any pending one.
    pub fn set_flash(&self, message: impl Into<String>) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, message.into())
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return the pending flash message.
    pub fn take_flash(&self) -> Option<String> {
        match self.0.remove_as::<String>(FLASH_KEY)? {
            Ok(message) => Some(message),
            Err(raw) => {
                tracing::warn!(raw = %raw, "discarding undecodable flash message");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
