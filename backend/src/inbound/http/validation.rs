//! Shared request-decoding helpers for inbound HTTP adapters.
//!
//! Extractor failures are routed through the domain error envelope so every
//! 400 response has the same shape.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for request decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

fn decoding_error(message: &str, code: ErrorCode, reason: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": code.as_str(),
        "reason": reason,
    }))
}

/// Error handler for `web::JsonConfig`.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    decoding_error(
        "request body must be a JSON object",
        ErrorCode::InvalidJson,
        err.to_string(),
    )
    .into()
}

/// Error handler for `web::QueryConfig`.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    decoding_error(
        "query string could not be parsed",
        ErrorCode::InvalidQuery,
        err.to_string(),
    )
    .into()
}

/// Treat empty query values as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None)]
    #[case(Some(String::new()), None)]
    #[case(Some("u1".to_owned()), Some("u1"))]
    #[case(Some(" ".to_owned()), Some(" "))]
    fn non_empty_drops_blank_values(#[case] raw: Option<String>, #[case] expected: Option<&str>) {
        assert_eq!(non_empty(raw).as_deref(), expected);
    }

    #[rstest]
    fn decoding_errors_carry_code() {
        let err = decoding_error("bad", ErrorCode::InvalidJson, "EOF".to_owned());
        assert_eq!(err.details(), Some(&json!({"code": "invalid_json", "reason": "EOF"})));
    }
}
