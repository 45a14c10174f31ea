// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Email verification endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::ApiError,
    models::{MessageResponse, ResendVerifyRequest},
    state::AppState,
    storage::repository::UserRepository,
    validate,
};

/// Confirm an email address via its single-use token.
///
/// The token is cleared on success, so a second visit finds no holder and
/// gets 404.
#[utoipa::path(
    get,
    path = "/api/verify/{token}",
    tag = "Verify",
    params(("token" = String, Path, description = "Verification token from the email link")),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 404, description = "Unknown or already-used token"),
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = UserRepository::new(&state.storage);
    let mut user = repo
        .find_by_verification_token(&token)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    user.verified = true;
    user.verification_token = None;
    repo.update(&user)?;

    tracing::info!(user_id = %user.id, "email verified");
    Ok(Json(MessageResponse::new("Verification successful")))
}

/// Re-send the verification email for an unverified account.
#[utoipa::path(
    post,
    path = "/api/verify",
    tag = "Verify",
    request_body = ResendVerifyRequest,
    responses(
        (status = 200, description = "Verification email sent", body = MessageResponse),
        (status = 400, description = "Missing email or already verified"),
        (status = 404, description = "Unknown email"),
    )
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(body): Json<ResendVerifyRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = validate::validate_resend(&body)?;

    let repo = UserRepository::new(&state.storage);
    let user = repo
        .find_by_email(&email)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.verified {
        return Err(ApiError::bad_request("Verification has already been passed"));
    }

    super::users::send_verification_mail(&state, &user).await;

    Ok(Json(MessageResponse::new("Verification email sent")))
}
