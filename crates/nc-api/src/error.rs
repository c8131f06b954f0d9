//! Maps `AppError` onto HTTP responses.
//!
//! Every failure body is `{ "message": ... }`. Extractor failures (bad JSON,
//! unparsable query string) are folded into the same taxonomy. Path ids are
//! taken as strings and rejected by `parse_id`.

use std::fmt;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use nc_core::AppError;
use serde::Serialize;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub message: &'a str,
}

/// `AppError` as an actix response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_internal() {
            log::error!("unhandled server error: {}", self.0);
        } else {
            log::debug!("request rejected: {}", self.0);
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.0.public_message(),
        })
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("unreadable json body: {err}");
    ApiError(AppError::MalformedBody).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("unreadable query string: {err}");
    ApiError(AppError::MalformedBody).into()
}
