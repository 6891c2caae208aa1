//! Test helpers for inbound HTTP components.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;

use crate::domain::LoginCredentials;
use crate::domain::ports::{
    CredentialStore, CredentialStoreError, DocumentStore, DocumentStoreError, TrailingNewline,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie a response sets, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Document store double backed by a sorted map.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryDocumentStore {
    pub fn with_documents<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Self {
        let store = Self::default();
        store.guard().extend(
            entries
                .into_iter()
                .map(|(name, content)| (name.to_owned(), content.to_vec())),
        );
        store
    }

    fn guard(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.documents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn content(&self, name: &str) -> Option<Vec<u8>> {
        self.guard().get(name).cloned()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self) -> Result<Vec<String>, DocumentStoreError> {
        Ok(self.guard().keys().cloned().collect())
    }

    async fn exists(&self, name: &str) -> bool {
        self.guard().contains_key(name)
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DocumentStoreError> {
        self.content(name)
            .ok_or_else(|| DocumentStoreError::not_found(name))
    }

    async fn create(&self, name: &str, content: &[u8]) -> Result<(), DocumentStoreError> {
        let mut documents = self.guard();
        if documents.contains_key(name) {
            return Err(DocumentStoreError::already_exists(name));
        }
        documents.insert(name.to_owned(), content.to_vec());
        Ok(())
    }

    async fn write(&self, name: &str, content: &str) -> Result<(), DocumentStoreError> {
        self.guard()
            .insert(name.to_owned(), TrailingNewline::Append.apply(content));
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), DocumentStoreError> {
        self.guard()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DocumentStoreError::not_found(name))
    }
}

/// Credential double accepting only [`TEST_USERNAME`] / [`TEST_PASSWORD`].
pub struct FixedCredentials;

#[async_trait]
impl CredentialStore for FixedCredentials {
    async fn verify(&self, credentials: &LoginCredentials) -> Result<bool, CredentialStoreError> {
        Ok(credentials.username().as_ref() == TEST_USERNAME
            && credentials.password() == TEST_PASSWORD)
    }
}

/// Handler state over `documents` and [`FixedCredentials`].
pub fn test_state(documents: Arc<InMemoryDocumentStore>) -> HttpState {
    HttpState::new(documents, Arc::new(FixedCredentials))
}

/// Full route table with session middleware over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(configure)
}

/// Sign in as the fixture user and return the resulting session cookie.
pub async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_form([("username", TEST_USERNAME), ("password", TEST_PASSWORD)])
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND, "fixture login succeeds");
    session_cookie(&res).expect("login sets the session cookie")
}

/// Read a response body as UTF-8 text.
pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}
