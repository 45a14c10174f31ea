// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved StoredUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::state::AppState;
use crate::storage::repository::{StoredUser, UserRepository};

use super::{verify_token, AuthError};

/// Extractor for authenticated users.
///
/// Validates the bearer token, resolves the subject to a stored user and
/// checks the token against the user's current session token, so tokens
/// revoked by logout or superseded by a later login are refused before
/// their signed expiry.
pub struct Auth(pub StoredUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        // Scheme word must be exactly "Bearer" with a non-empty token
        let (scheme, token) = auth_header
            .split_once(' ')
            .ok_or(AuthError::InvalidAuthHeader)?;
        if scheme != "Bearer" || token.is_empty() {
            return Err(AuthError::InvalidAuthHeader);
        }

        let claims = verify_token(token, &state.config.jwt_secret)?;

        let repo = UserRepository::new(&state.storage);
        let user = repo
            .find(&claims.sub)
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UnknownUser)?;

        // Only the most recent session token is honored
        if user.token.as_deref() != Some(token) {
            return Err(AuthError::SessionRevoked);
        }

        Ok(Auth(user))
    }
}
