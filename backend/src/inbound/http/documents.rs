//! Document handlers.
//!
//! ```text
//! GET  /                  list documents
//! GET  /new               new document form
//! POST /new               create an empty document
//! GET  /{file}            view a document
//! GET  /{file}/edit       edit form
//! POST /{file}/edit       replace content
//! POST /{file}/delete     remove a document
//! ```
//!
//! Everything except listing and viewing requires a logged-in session. Form
//! bodies are extracted leniently so the login guard always runs first.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::DocumentStoreError;
use crate::domain::{Error, NameValidationError, RenderedDocument, render, validate_name};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, PageContext};

/// Form body for `POST /new`. A missing name is treated as blank.
#[derive(Debug, Deserialize)]
pub struct NewDocumentForm {
    #[serde(default)]
    pub file_name: String,
}

/// Form body for `POST /{file}/edit`.
#[derive(Debug, Deserialize)]
pub struct EditDocumentForm {
    #[serde(default)]
    pub content: String,
}

type FormResult<T> = Result<web::Form<T>, actix_web::Error>;

fn form_body<T>(form: FormResult<T>) -> ApiResult<T> {
    form.map(web::Form::into_inner)
        .map_err(|error| Error::invalid_request(format!("Malformed form submission: {error}")))
}

pub(crate) fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Flash the not-found message and build the matching redirect error.
fn document_missing(session: &SessionContext, name: &str) -> Error {
    let error = Error::from(DocumentStoreError::not_found(name));
    match session.set_flash(error.message()) {
        Ok(()) => error,
        Err(flash_error) => flash_error,
    }
}

async fn read_existing(
    state: &HttpState,
    session: &SessionContext,
    name: &str,
) -> ApiResult<Vec<u8>> {
    if !state.documents.exists(name).await {
        return Err(document_missing(session, name));
    }
    state.documents.read(name).await.map_err(|error| match error {
        DocumentStoreError::NotFound { .. } => document_missing(session, name),
        other => other.into(),
    })
}

/// List every document.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let documents = state.documents.list().await?;
    let ctx = PageContext::from_session(&session)?;
    Ok(views::respond(StatusCode::OK, views::index(&ctx, &documents)))
}

/// Show the form for naming a new document.
#[get("/new")]
pub async fn new_document_form(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_login()?;
    let ctx = PageContext::from_session(&session)?;
    Ok(views::respond(
        StatusCode::OK,
        views::new_document_form(&ctx, "", None),
    ))
}

/// Create an empty document after validating its name.
#[post("/new")]
pub async fn create_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormResult<NewDocumentForm>,
) -> ApiResult<HttpResponse> {
    session.require_login()?;
    let NewDocumentForm { file_name } = form_body(form)?;
    let existing = state.documents.list().await?;

    let created = match validate_name(&file_name, &existing) {
        // Hidden files and directories are absent from the listing.
        Ok(name) => match state.documents.create(name.as_ref(), b"").await {
            Ok(()) => Ok(name),
            Err(DocumentStoreError::AlreadyExists { .. }) => Err(NameValidationError::NotUnique),
            Err(other) => return Err(other.into()),
        },
        Err(reason) => Err(reason),
    };

    match created {
        Ok(name) => {
            info!(document = %name, "document created");
            session.set_flash(format!("{name} has been created."))?;
            Ok(redirect_home())
        }
        Err(reason) => {
            let ctx = PageContext::from_session(&session)?;
            let message = reason.to_string();
            Ok(views::respond(
                StatusCode::UNPROCESSABLE_ENTITY,
                views::new_document_form(&ctx, &file_name, Some(&message)),
            ))
        }
    }
}

/// Serve a document rendered according to its extension.
#[get("/{file}")]
pub async fn show_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let content = read_existing(&state, &session, &name).await?;
    let rendered = render(&name, content);
    let content_type = rendered.content_type();

    Ok(match rendered {
        RenderedDocument::Html(html) => {
            let ctx = PageContext::from_session(&session)?;
            views::respond(StatusCode::OK, views::markdown_page(&ctx, &name, &html))
        }
        RenderedDocument::PlainText(bytes) | RenderedDocument::Opaque(bytes) => {
            HttpResponse::Ok().content_type(content_type).body(bytes)
        }
    })
}

/// Show the editor for an existing document.
#[get("/{file}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_login()?;
    let name = path.into_inner();
    let content = read_existing(&state, &session, &name).await?;
    let ctx = PageContext::from_session(&session)?;
    Ok(views::respond(
        StatusCode::OK,
        views::edit_form(&ctx, &name, &String::from_utf8_lossy(&content)),
    ))
}

/// Replace a document's content.
///
/// There is no existence check: posting to a missing name creates it.
#[post("/{file}/edit")]
pub async fn update_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: FormResult<EditDocumentForm>,
) -> ApiResult<HttpResponse> {
    session.require_login()?;
    let name = path.into_inner();
    let EditDocumentForm { content } = form_body(form)?;
    state.documents.write(&name, &content).await?;
    info!(document = %name, "document updated");
    session.set_flash(format!("{name} has been updated."))?;
    Ok(redirect_home())
}

/// Remove a document.
#[post("/{file}/delete")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_login()?;
    let name = path.into_inner();
    match state.documents.delete(&name).await {
        Ok(()) => {
            info!(document = %name, "document deleted");
            session.set_flash(format!("{name} has been deleted."))?;
            Ok(redirect_home())
        }
        Err(DocumentStoreError::NotFound { .. }) => Err(document_missing(&session, &name)),
        Err(other) => Err(other.into()),
    }
}
