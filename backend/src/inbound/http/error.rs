//! Plain-text rendering of domain errors.
//!
//! Not-found and bad-request messages reach the client verbatim. Internal
//! failures are replaced by [`INTERNAL_SERVER_ERROR`]; their detail stays in
//! the logs, correlated through the `trace-id` header.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Handler result carrying a domain [`Error`].
pub type ApiResult<T> = Result<T, Error>;

/// Body sent in place of any internal failure message.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidRequest => Self::BAD_REQUEST,
            ErrorCode::NotFound => Self::NOT_FOUND,
            ErrorCode::InternalError => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code().into()
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self.code() {
            ErrorCode::InternalError => INTERNAL_SERVER_ERROR,
            ErrorCode::InvalidRequest | ErrorCode::NotFound => self.message(),
        };

        let mut response = HttpResponse::build(self.status_code());
        response.content_type(ContentType::plaintext());
        if let Some(trace_id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id));
        }
        response.body(body.to_owned())
    }
}
