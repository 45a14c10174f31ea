// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! API request and response types.
//!
//! Request bodies use `Option` fields so validation can name the missing
//! field instead of surfacing a deserialization error; `validate` holds the
//! per-endpoint contracts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::repository::StoredUser;

/// Subscription tier for a user account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    #[default]
    Starter,
    Pro,
    Business,
}

/// Body for POST /api/users/signup.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body for POST /api/users/login.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public projection of a user. Excludes the password hash, session token
/// and verification state.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub email: String,
    pub subscription: Subscription,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

impl From<&StoredUser> for UserResponse {
    fn from(user: &StoredUser) -> Self {
        Self {
            email: user.email.clone(),
            subscription: user.subscription,
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Response for POST /api/users/signup.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user: UserResponse,
}

/// Response for POST /api/users/login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response for PATCH /api/users/avatars.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarResponse {
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

/// Body for POST /api/contacts.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

/// Body for PUT and PATCH /api/contacts/{id}.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Body for PATCH /api/contacts/{id}/favorite.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    pub favorite: Option<bool>,
}

/// Body for POST /api/verify (resend verification email).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ResendVerifyRequest {
    pub email: Option<String>,
}

/// Generic `{"message"}` success body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
