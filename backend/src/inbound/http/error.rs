//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] stays transport-agnostic; this module gives it a status
//! code, a JSON body and the `trace-id` header. Internal errors are redacted
//! before they reach the client. Extractor rejections (bad JSON, bad query
//! strings, malformed path ids) are turned into the same envelope so callers
//! see one error shape.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::MAX_UPLOAD_BYTES;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client; internal failures keep only the trace id.
pub(crate) fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error promoted to domain error");
        Error::internal("Internal server error")
    }
}

fn rejected(code: &'static str, message: String) -> Error {
    debug!(code, %message, "request rejected by extractor");
    Error::invalid_request(message).with_details(json!({ "code": code }))
}

/// Report undecodable JSON bodies as `invalid_request`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be JSON".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => other.to_string(),
    };
    rejected("invalid_body", message).into()
}

/// Report unparsable query strings as `invalid_request`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejected("invalid_query", format!("invalid query string: {err}")).into()
}

/// Report malformed path identifiers as `invalid_request`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejected("invalid_id", format!("invalid path parameter: {err}")).into()
}

/// Largest JSON body accepted: a base64 encoded upload at the storage cap
/// plus room for the surrounding fields.
pub const JSON_BODY_LIMIT: usize = MAX_UPLOAD_BYTES.div_ceil(3) * 4 + 64 * 1024;

/// Extractor configuration shared by the app and its tests.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(json_error_handler),
    )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
