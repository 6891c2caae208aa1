//! End-to-end document workflows against a real document root.
//!
//! Each test builds the full application over a temporary directory, signs
//! in with the fixture account, and carries the session cookie between
//! requests like a browser would.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use cms::domain::TRACE_ID_HEADER;
use cms::test_support::{ADMIN_PASSWORD, ADMIN_USERNAME, TestWorkspace};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> TestWorkspace {
    TestWorkspace::new().expect("create test workspace")
}

fn cookie_from<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

async fn text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body")
}

/// Minimal browser: remembers the latest session cookie.
struct Browser<'a, S> {
    app: &'a S,
    cookie: Option<Cookie<'static>>,
}

impl<'a, S, B> Browser<'a, S>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    fn new(app: &'a S) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, request: test::TestRequest) -> ServiceResponse<B> {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(self.app, request.to_request()).await;
        if let Some(cookie) = cookie_from(&res) {
            self.cookie = Some(cookie);
        }
        res
    }

    async fn get(&mut self, uri: &str) -> ServiceResponse<B> {
        self.send(test::TestRequest::get().uri(uri)).await
    }

    async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> ServiceResponse<B> {
        self.send(test::TestRequest::post().uri(uri).set_form(form))
            .await
    }

    async fn sign_in(&mut self) {
        let res = self
            .post_form(
                "/users/login",
                &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
            )
            .await;
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    async fn home_page(&mut self) -> String {
        let res = self.get("/").await;
        assert_eq!(res.status(), StatusCode::OK);
        text(res).await
    }
}

#[rstest]
#[actix_web::test]
async fn created_text_document_is_served_empty(workspace: TestWorkspace) {
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);
    browser.sign_in().await;

    let res = browser.post_form("/new", &[("file_name", "about.txt")]).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(browser.home_page().await.contains("about.txt has been created."));

    let res = browser.get("/about.txt").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/plain")
    );
    assert_eq!(text(res).await, "");
    assert_eq!(workspace.read("about.txt").expect("file on disk"), b"");
}

#[rstest]
#[actix_web::test]
async fn edited_document_shows_new_content(workspace: TestWorkspace) {
    workspace.seed("about.txt", b"").expect("seed document");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);
    browser.sign_in().await;

    let res = browser
        .post_form("/about.txt/edit", &[("content", "update")])
        .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(browser.home_page().await.contains("about.txt has been updated."));

    let res = browser.get("/about.txt").await;
    assert!(text(res).await.contains("update"));
    assert_eq!(workspace.read("about.txt").expect("file on disk"), b"update\n");
}

#[rstest]
#[actix_web::test]
async fn markdown_document_is_rendered_as_html(workspace: TestWorkspace) {
    workspace.seed("changes.md", b"# test\n").expect("seed document");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);

    let res = browser.get("/changes.md").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(text(res).await.contains("<h1>test</h1>"));
}

#[rstest]
#[actix_web::test]
async fn deleted_document_can_no_longer_be_viewed(workspace: TestWorkspace) {
    workspace.seed("history.txt", b"1993\n").expect("seed document");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);
    browser.sign_in().await;

    let res = browser.post_form("/history.txt/delete", &[]).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let home = browser.home_page().await;
    assert!(home.contains("history.txt has been deleted."));
    assert!(workspace.read("history.txt").is_err());

    let res = browser.get("/history.txt").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(
        browser
            .home_page()
            .await
            .contains("history.txt does not exist.")
    );
}

#[rstest]
#[actix_web::test]
async fn anonymous_edit_leaves_disk_untouched(workspace: TestWorkspace) {
    workspace.seed("about.txt", b"original\n").expect("seed document");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);

    let res = browser
        .post_form("/about.txt/edit", &[("content", "vandalised")])
        .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(
        browser
            .home_page()
            .await
            .contains("You must be logged in to do that.")
    );
    assert_eq!(
        workspace.read("about.txt").expect("file on disk"),
        b"original\n"
    );
}

#[rstest]
#[actix_web::test]
async fn wrong_password_keeps_session_anonymous(workspace: TestWorkspace) {
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);

    let res = browser
        .post_form(
            "/users/login",
            &[("username", ADMIN_USERNAME), ("password", "wrong")],
        )
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(res).await.contains("Invalid credentials."));

    let res = browser.get("/new").await;
    assert_eq!(res.status(), StatusCode::FOUND);
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_identifiers(workspace: TestWorkspace) {
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);

    let res = browser.get("/missing.txt").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn listing_skips_dotfiles_and_directories(workspace: TestWorkspace) {
    workspace.seed(".hidden", b"x").expect("seed dotfile");
    workspace.seed("visible.txt", b"x").expect("seed document");
    std::fs::create_dir(workspace.root().join("folder.txt")).expect("create directory");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);

    let home = browser.home_page().await;
    assert!(home.contains("visible.txt"));
    assert!(!home.contains(".hidden"));
    assert!(!home.contains("folder.txt"));
}

#[rstest]
#[case::hidden_file(".notes.txt")]
#[case::directory("folder.txt")]
#[actix_web::test]
async fn create_never_clobbers_unlisted_entries(workspace: TestWorkspace, #[case] name: &str) {
    workspace.seed(".notes.txt", b"keep me").expect("seed dotfile");
    std::fs::create_dir(workspace.root().join("folder.txt")).expect("create directory");
    let app = test::init_service(workspace.app()).await;
    let mut browser = Browser::new(&app);
    browser.sign_in().await;

    let res = browser.post_form("/new", &[("file_name", name)]).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(res).await.contains("The file name must be unique."));
    assert_eq!(
        workspace.read(".notes.txt").expect("dotfile on disk"),
        b"keep me"
    );
    assert!(workspace.root().join("folder.txt").is_dir());
}

#[rstest]
#[actix_web::test]
async fn session_cookie_is_http_only(workspace: TestWorkspace) {
    let app = test::init_service(workspace.app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_form([("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .to_request(),
    )
    .await;
    let cookie = cookie_from(&res).expect("login sets the session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.max_age().is_some(), "persistent session cookie");
    assert!(!cookie.value().contains(ADMIN_USERNAME));
}
