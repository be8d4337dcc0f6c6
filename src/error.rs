use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    InvalidArgument,
    AuthenticationFailure,
    RateLimited,
    UpstreamUnavailable,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    pub kind: Kind,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        internal_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        internal_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(_: reqwest::Error) -> Self {
        upstream_error()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.kind {
            Kind::InvalidArgument => StatusCode::BAD_REQUEST,
            Kind::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            Kind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Kind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            Kind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_argument_error(message: impl Into<String>) -> Error {
    Error {
        kind: Kind::InvalidArgument,
        message: message.into(),
    }
}

pub fn authentication_error(message: impl Into<String>) -> Error {
    Error {
        kind: Kind::AuthenticationFailure,
        message: message.into(),
    }
}

pub fn rate_limited_error() -> Error {
    Error {
        kind: Kind::RateLimited,
        message: "too many OTP requests, try again later".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        kind: Kind::UpstreamUnavailable,
        message: "upstream provider error".into(),
    }
}

pub fn internal_error<T: Debug>(err: T) -> Error {
    tracing::error!(?err, "internal error");

    Error {
        kind: Kind::Internal,
        message: "internal server error".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_http_statuses() {
        let cases = [
            (invalid_argument_error("bad"), StatusCode::BAD_REQUEST),
            (authentication_error("denied"), StatusCode::UNAUTHORIZED),
            (rate_limited_error(), StatusCode::TOO_MANY_REQUESTS),
            (upstream_error(), StatusCode::BAD_GATEWAY),
            (internal_error("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let error = internal_error("connection reset by peer");
        assert_eq!(error.message, "internal server error");
    }
}
