//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving browsers a
//! sensible response. Guard and lookup failures become a redirect to the
//! document list, where the flash written by the handler explains what
//! happened. Internal failures are logged and redacted.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized | ErrorCode::NotFound => StatusCode::FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.code() {
            ErrorCode::Unauthorized | ErrorCode::NotFound => {
                builder.insert_header((header::LOCATION, "/")).finish()
            }
            ErrorCode::InvalidRequest => builder
                .content_type(mime_text())
                .body(self.message().to_owned()),
            ErrorCode::InternalError => {
                error!(
                    trace_id = self.trace_id().unwrap_or_default(),
                    message = self.message(),
                    "request failed"
                );
                builder.content_type(mime_text()).body(REDACTED_MESSAGE)
            }
        }
    }
}

fn mime_text() -> header::ContentType {
    header::ContentType::plaintext()
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}
