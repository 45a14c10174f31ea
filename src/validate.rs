// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Request validation.
//!
//! One contract per endpoint, all built from the same primitives, so every
//! handler runs the identical validation step ahead of its logic:
//! - create: every listed field required
//! - full update (PUT): every listed field required
//! - partial update (PATCH): at least one listed field present
//!
//! Error messages name the violated field where one exists.

use crate::error::ApiError;
use crate::models::{
    CreateContactRequest, FavoriteRequest, LoginRequest, ResendVerifyRequest, SignupRequest,
    UpdateContactRequest,
};
use crate::storage::repository::ContactUpdate;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Shallow email format check: one `@` with a non-empty local part and a
/// dotted domain. Deliverability is the mail relay's problem.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Require a field to be present and non-empty.
fn require(value: &Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request(format!("missing required {field} field")))
}

/// Require a syntactically valid email field.
fn require_email(value: &Option<String>, field: &str) -> Result<String, ApiError> {
    let email = require(value, field)?;
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request(format!("{field} must be a valid email")));
    }
    Ok(email)
}

/// Validated credentials from a signup or login body.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Contract for POST /api/users/signup.
pub fn validate_signup(body: &SignupRequest) -> Result<Credentials, ApiError> {
    let email = require_email(&body.email, "email")?.to_lowercase();
    let password = require(&body.password, "password")?;
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(Credentials { email, password })
}

/// Contract for POST /api/users/login.
pub fn validate_login(body: &LoginRequest) -> Result<Credentials, ApiError> {
    Ok(Credentials {
        email: require_email(&body.email, "email")?.to_lowercase(),
        password: require(&body.password, "password")?,
    })
}

/// Validated fields for a new contact.
#[derive(Debug)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
}

/// Contract for POST /api/contacts: name, email, phone all required.
pub fn validate_new_contact(body: &CreateContactRequest) -> Result<NewContact, ApiError> {
    Ok(NewContact {
        name: require(&body.name, "name")?,
        email: require_email(&body.email, "email")?,
        phone: require(&body.phone, "phone")?,
        favorite: body.favorite.unwrap_or(false),
    })
}

/// Contract for PUT /api/contacts/{id}: name, email, phone all required.
pub fn validate_full_update(body: &UpdateContactRequest) -> Result<ContactUpdate, ApiError> {
    Ok(ContactUpdate {
        name: Some(require(&body.name, "name")?),
        email: Some(require_email(&body.email, "email")?),
        phone: Some(require(&body.phone, "phone")?),
        favorite: None,
    })
}

/// Contract for PATCH /api/contacts/{id}: at least one field present.
pub fn validate_partial_update(body: &UpdateContactRequest) -> Result<ContactUpdate, ApiError> {
    if body.name.is_none() && body.email.is_none() && body.phone.is_none() {
        return Err(ApiError::bad_request("missing fields"));
    }
    let email = match &body.email {
        Some(_) => Some(require_email(&body.email, "email")?),
        None => None,
    };
    Ok(ContactUpdate {
        name: body.name.clone(),
        email,
        phone: body.phone.clone(),
        favorite: None,
    })
}

/// Contract for PATCH /api/contacts/{id}/favorite.
pub fn validate_favorite(body: &FavoriteRequest) -> Result<bool, ApiError> {
    body.favorite
        .ok_or_else(|| ApiError::bad_request("missing field favorite"))
}

/// Contract for POST /api/verify.
pub fn validate_resend(body: &ResendVerifyRequest) -> Result<String, ApiError> {
    Ok(require_email(&body.email, "email")?.to_lowercase())
}
