// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Authentication errors.
//!
//! Every authentication failure renders the same generic 401 body so the
//! response does not reveal whether a token was malformed, expired, or
//! revoked. The precise reason is kept for server-side logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Header is not of the exact form `Bearer <token>`
    InvalidAuthHeader,
    /// Token is malformed
    MalformedToken,
    /// Token signature is invalid
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token subject does not resolve to a stored user
    UnknownUser,
    /// Token no longer matches the user's stored session token
    SessionRevoked,
    /// Internal error (storage failure during user resolution)
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: String,
}

impl AuthError {
    /// Stable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::UnknownUser => "unknown_user",
            AuthError::SessionRevoked => "session_revoked",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::Internal(msg) => write!(f, "internal authentication error: {msg}"),
            other => write!(f, "{}", other.error_code()),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::UNAUTHORIZED {
            tracing::debug!(reason = self.error_code(), "rejected request");
            "Not authorized"
        } else {
            tracing::error!(error = %self, "authentication failed internally");
            "Internal server error"
        };
        (status, Json(AuthErrorBody {
            message: message.to_string(),
        }))
            .into_response()
    }
}
