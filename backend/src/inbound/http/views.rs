//! HTML pages rendered with `maud`.
//!
//! Every interpolated value is escaped by the template engine. The only
//! pre-escaped content is Markdown output produced by
//! [`crate::domain::render`].

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::domain::rendering::HTML_CONTENT_TYPE;
use crate::domain::{Error, Username};
use crate::inbound::http::session::SessionContext;

/// Per-request values shared by every page.
#[derive(Debug, Default)]
pub struct PageContext {
    /// Logged-in user, if any.
    pub username: Option<Username>,
    /// Message consumed from the session (or produced by this request).
    pub flash: Option<String>,
}

impl PageContext {
    /// Read the username and consume the pending flash.
    pub fn from_session(session: &SessionContext) -> Result<Self, Error> {
        Ok(Self {
            username: session.username()?,
            flash: session.take_flash(),
        })
    }

    /// Replace the flash with a message produced by this request.
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(message.into());
        self
    }
}

/// Wrap a rendered page in an HTML response.
pub fn respond(status: StatusCode, page: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(HTML_CONTENT_TYPE)
        .body(page.into_string())
}

fn layout(title: &str, ctx: &PageContext, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                @if let Some(message) = &ctx.flash {
                    p class="flash" { (message) }
                }
                main { (body) }
                footer {
                    @match &ctx.username {
                        Some(username) => {
                            p { "Signed in as " (username) "." }
                            form method="post" action="/users/logout" {
                                button type="submit" { "Sign Out" }
                            }
                        }
                        None => {
                            p { a href="/users/login" { "Sign In" } }
                        }
                    }
                }
            }
        }
    }
}

/// Document list with view, edit and delete controls.
pub fn index(ctx: &PageContext, documents: &[String]) -> Markup {
    let body = html! {
        ul {
            @for name in documents {
                li {
                    a href={ "/" (name) } { (name) }
                    " "
                    a href={ "/" (name) "/edit" } { "Edit" }
                    form method="post" action={ "/" (name) "/delete" } style="display:inline" {
                        button type="submit" { "Delete" }
                    }
                }
            }
        }
        p { a href="/new" { "New Document" } }
    };
    layout("Documents", ctx, body)
}

/// Sign-in form. `username` pre-fills the field after a failed attempt.
pub fn login_form(ctx: &PageContext, username: &str) -> Markup {
    let body = html! {
        form method="post" action="/users/login" {
            div {
                label for="username" { "Username" }
                input type="text" id="username" name="username" value=(username);
            }
            div {
                label for="password" { "Password" }
                input type="password" id="password" name="password";
            }
            button type="submit" { "Sign In" }
        }
    };
    layout("Sign In", ctx, body)
}

/// New document form, optionally with an inline validation error.
pub fn new_document_form(ctx: &PageContext, file_name: &str, error: Option<&str>) -> Markup {
    let body = html! {
        form method="post" action="/new" {
            label for="file_name" { "Add a new document:" }
            input type="text" id="file_name" name="file_name" value=(file_name);
            button type="submit" { "Create" }
        }
        @if let Some(message) = error {
            p class="error" { (message) }
        }
    };
    layout("New Document", ctx, body)
}

/// Editor for the raw content of `name`.
pub fn edit_form(ctx: &PageContext, name: &str, content: &str) -> Markup {
    let body = html! {
        h2 { "Edit content of " (name) ":" }
        form method="post" action={ "/" (name) "/edit" } {
            textarea name="content" rows="20" cols="100" { (content) }
            button type="submit" { "Save Changes" }
        }
    };
    layout(name, ctx, body)
}

/// Rendered Markdown document inside the shared layout.
pub fn markdown_page(ctx: &PageContext, name: &str, rendered: &str) -> Markup {
    layout(name, ctx, html! { (PreEscaped(rendered)) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn signed_in() -> PageContext {
        PageContext {
            username: Username::new("admin").ok(),
            flash: Some("Welcome!".to_owned()),
        }
    }

    #[rstest]
    fn layout_shows_sign_out_for_logged_in_user(signed_in: PageContext) {
        let page = index(&signed_in, &[]).into_string();
        assert!(page.contains("Signed in as admin."));
        assert!(page.contains("Sign Out"));
        assert!(page.contains("Welcome!"));
    }

    #[rstest]
    fn layout_shows_sign_in_for_anonymous_user() {
        let page = index(&PageContext::default(), &[]).into_string();
        assert!(page.contains("Sign In"));
        assert!(!page.contains("Signed in as"));
    }

    #[rstest]
    fn index_links_each_document() {
        let docs = vec!["about.txt".to_owned(), "changes.md".to_owned()];
        let page = index(&PageContext::default(), &docs).into_string();
        assert!(page.contains(r#"href="/about.txt""#));
        assert!(page.contains(r#"href="/changes.md/edit""#));
        assert!(page.contains(r#"action="/changes.md/delete""#));
    }

    #[rstest]
    fn edit_form_escapes_content() {
        let page = edit_form(&PageContext::default(), "a.txt", "<b>hi</b>").into_string();
        assert!(page.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(page.contains("<textarea"));
    }

    #[rstest]
    fn new_document_form_shows_inline_error() {
        let page = new_document_form(
            &PageContext::default(),
            "story",
            Some("A file extension is required."),
        )
        .into_string();
        assert!(page.contains("Add a new document:"));
        assert!(page.contains("A file extension is required."));
        assert!(page.contains(r#"value="story""#));
    }

    #[rstest]
    fn markdown_page_embeds_rendered_html() {
        let page =
            markdown_page(&PageContext::default(), "a.md", "<h1>test</h1>\n").into_string();
        assert!(page.contains("<h1>test</h1>"));
    }
}
