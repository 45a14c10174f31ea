// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! User endpoints: signup, login, logout, current user and avatar upload.

use std::path::Path as FsPath;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{issue_token, Auth},
    config::MAX_AVATAR_BYTES,
    error::ApiError,
    models::{
        AvatarResponse, LoginRequest, LoginResponse, SignupRequest, SignupResponse, UserResponse,
    },
    services::avatar::{self, AvatarError},
    services::password,
    state::AppState,
    storage::repository::{StoredUser, UserRepository},
    validate,
};

/// Register a new account.
///
/// The account starts unverified; a verification link is emailed when SMTP
/// is configured. No session token is issued until login.
#[utoipa::path(
    post,
    path = "/api/users/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let creds = validate::validate_signup(&body)?;

    let repo = UserRepository::new(&state.storage);
    if repo.find_by_email(&creds.email)?.is_some() {
        return Err(ApiError::conflict("Email in use"));
    }

    let hash = password::hash_password(&creds.password).map_err(ApiError::internal)?;
    let user = StoredUser::new(&creds.email, hash, avatar::gravatar_url(&creds.email));
    repo.create(&user)?;

    send_verification_mail(&state, &user).await;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: (&user).into(),
        }),
    ))
}

/// Email the verification link, or log why it was skipped. Signup never
/// fails on mail problems; the token can be re-sent later.
pub(super) async fn send_verification_mail(state: &AppState, user: &StoredUser) {
    let Some(token) = user.verification_token.as_deref() else {
        return;
    };
    match &state.mailer {
        Some(mailer) => {
            let link = state.config.verification_link(token);
            if let Err(err) = mailer.send_verification(&user.email, &link).await {
                tracing::error!(error = %err, recipient = %user.email, "failed to send verification email");
            }
        }
        None => {
            tracing::warn!(recipient = %user.email, "SMTP not configured, skipping verification email");
        }
    }
}

/// Log in and receive a session token.
///
/// Issuing a new token overwrites the stored one, so at most one session
/// per user is ever valid.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token and user", body = LoginResponse),
        (status = 400, description = "Validation error or unverified email"),
        (status = 401, description = "Wrong email or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let creds = validate::validate_login(&body)?;

    // One message for unknown email and wrong password alike.
    let wrong_credentials =
        || ApiError::new(StatusCode::UNAUTHORIZED, "Email or password is wrong");

    let repo = UserRepository::new(&state.storage);
    let mut user = repo
        .find_by_email(&creds.email)?
        .ok_or_else(wrong_credentials)?;

    if !password::verify_password(&creds.password, &user.password_hash) {
        return Err(wrong_credentials());
    }

    if !user.verified {
        return Err(ApiError::bad_request("Email is not verified"));
    }

    let token = issue_token(&user.id, &state.config.jwt_secret)
        .map_err(ApiError::internal)?;
    user.token = Some(token.clone());
    repo.update(&user)?;

    Ok(Json(LoginResponse {
        token,
        user: (&user).into(),
    }))
}

/// End the current session.
#[utoipa::path(
    get,
    path = "/api/users/logout",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn logout(State(state): State<AppState>, Auth(mut user): Auth) -> Result<StatusCode, ApiError> {
    user.token = None;
    UserRepository::new(&state.storage).update(&user)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the current authenticated user.
#[utoipa::path(
    get,
    path = "/api/users/current",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Public user projection", body = UserResponse),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn current(Auth(user): Auth) -> Json<UserResponse> {
    Json((&user).into())
}

/// Upload a new avatar (multipart field `avatar`).
#[utoipa::path(
    patch,
    path = "/api/users/avatars",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "New avatar URL", body = AvatarResponse),
        (status = 400, description = "Missing, oversized or non-image file"),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn update_avatar(
    State(state): State<AppState>,
    Auth(mut user): Auth,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Malformed upload"))?
    {
        if field.name() != Some("avatar") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
        let ext = avatar::allowed_extension(filename)
            .ok_or_else(|| ApiError::bad_request("Only image files are allowed"))?;

        if let Some(content_type) = field.content_type() {
            if !content_type.starts_with("image/") {
                return Err(ApiError::bad_request("Only image files are allowed"));
            }
        }

        // A body over the configured limit surfaces as a read error here.
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::bad_request("File exceeds the 2MB limit"))?;
        if data.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::bad_request("File exceeds the 2MB limit"));
        }

        upload = Some((ext, data.to_vec()));
        break;
    }

    let (ext, data) = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let url = avatar::store_avatar(
        &state.storage.paths().tmp_dir(),
        FsPath::new(&state.config.public_dir),
        &user.id,
        &ext,
        &data,
    )
    .map_err(|err| match err {
        AvatarError::Image(_) => ApiError::bad_request("Only image files are allowed"),
        other => ApiError::internal(other),
    })?;

    // Only repoint the user once the resized file is in place.
    user.avatar_url = url.clone();
    UserRepository::new(&state.storage).update(&user)?;

    Ok(Json(AvatarResponse { avatar_url: url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::verify::verify_email;
    use axum::extract::Path;
    use tempfile::TempDir;

    fn test_state() -> (AppState, TempDir) {
        let dir = TempDir::new().unwrap();
        let state = AppState::for_tests(dir.path(), "users-secret");
        (state, dir)
    }

    fn signup_body(email: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.to_string()),
            password: Some("sup3rsecret".to_string()),
        }
    }

    fn login_body(email: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some("sup3rsecret".to_string()),
        }
    }

    async fn signup_user(state: &AppState, email: &str) -> StoredUser {
        let (status, _) = signup(State(state.clone()), Json(signup_body(email)))
            .await
            .expect("signup succeeds");
        assert_eq!(status, StatusCode::CREATED);
        UserRepository::new(&state.storage)
            .find_by_email(email)
            .unwrap()
            .expect("user persisted")
    }

    async fn verified_user(state: &AppState, email: &str) -> StoredUser {
        let user = signup_user(state, email).await;
        let token = user.verification_token.clone().unwrap();
        verify_email(State(state.clone()), Path(token)).await.unwrap();
        UserRepository::new(&state.storage).get(&user.id).unwrap()
    }

    #[tokio::test]
    async fn signup_creates_unverified_user_with_gravatar_default() {
        let (state, _dir) = test_state();
        let (status, Json(body)) = signup(
            State(state.clone()),
            Json(signup_body("New@Example.com")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.user.email, "new@example.com");
        assert!(body.user.avatar_url.starts_with("https://www.gravatar.com/avatar/"));

        let stored = UserRepository::new(&state.storage)
            .find_by_email("new@example.com")
            .unwrap()
            .unwrap();
        assert!(!stored.verified);
        assert!(stored.verification_token.is_some());
        assert!(stored.token.is_none());
        // The hash is stored, never the password
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn signup_duplicate_email_is_conflict() {
        let (state, _dir) = test_state();
        signup_user(&state, "dup@example.com").await;

        let err = signup(State(state), Json(signup_body("Dup@Example.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Email in use");
    }

    #[tokio::test]
    async fn login_before_verification_is_rejected() {
        let (state, _dir) = test_state();
        signup_user(&state, "a@example.com").await;

        let err = login(State(state), Json(login_body("a@example.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Email is not verified");
    }

    #[tokio::test]
    async fn login_after_verification_issues_a_stored_token() {
        let (state, _dir) = test_state();
        let user = verified_user(&state, "a@example.com").await;

        let Json(body) = login(State(state.clone()), Json(login_body("a@example.com")))
            .await
            .unwrap();
        assert!(!body.token.is_empty());
        assert_eq!(body.user.email, "a@example.com");

        let stored = UserRepository::new(&state.storage).get(&user.id).unwrap();
        assert_eq!(stored.token.as_deref(), Some(body.token.as_str()));
    }

    #[tokio::test]
    async fn login_uses_one_message_for_unknown_email_and_wrong_password() {
        let (state, _dir) = test_state();
        verified_user(&state, "a@example.com").await;

        let err = login(State(state.clone()), Json(login_body("nobody@example.com")))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Email or password is wrong");

        let err = login(
            State(state),
            Json(LoginRequest {
                email: Some("a@example.com".into()),
                password: Some("wrongpassword".into()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Email or password is wrong");
    }

    #[tokio::test]
    async fn relogin_replaces_the_stored_session_token() {
        let (state, _dir) = test_state();
        let user = verified_user(&state, "a@example.com").await;

        let Json(first) = login(State(state.clone()), Json(login_body("a@example.com")))
            .await
            .unwrap();
        // Claims carry second-resolution timestamps; force distinct tokens.
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let Json(second) = login(State(state.clone()), Json(login_body("a@example.com")))
            .await
            .unwrap();

        assert_ne!(first.token, second.token);
        let stored = UserRepository::new(&state.storage).get(&user.id).unwrap();
        assert_eq!(stored.token.as_deref(), Some(second.token.as_str()));
    }

    #[tokio::test]
    async fn logout_clears_the_stored_token() {
        let (state, _dir) = test_state();
        let user = verified_user(&state, "a@example.com").await;
        login(State(state.clone()), Json(login_body("a@example.com")))
            .await
            .unwrap();

        let repo = UserRepository::new(&state.storage);
        let logged_in = repo.get(&user.id).unwrap();
        let status = logout(State(state.clone()), Auth(logged_in)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert!(repo.get(&user.id).unwrap().token.is_none());
    }

    #[tokio::test]
    async fn current_returns_the_public_projection() {
        let (state, _dir) = test_state();
        let user = verified_user(&state, "a@example.com").await;

        let Json(body) = current(Auth(user.clone())).await;
        assert_eq!(body.email, user.email);
        assert_eq!(body.avatar_url, user.avatar_url);
    }

    mod avatar_upload {
        use super::*;
        use crate::api::router;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use tower::ServiceExt;

        const BOUNDARY: &str = "rolodex-test-boundary";

        /// A logged-in user whose token the router will accept.
        fn session(state: &AppState) -> (StoredUser, String) {
            let repo = UserRepository::new(&state.storage);
            let mut user = StoredUser::new("ava@example.com", "$argon2id$hash", "/avatars/old.png");
            user.verified = true;
            let token = issue_token(&user.id, "users-secret").unwrap();
            user.token = Some(token.clone());
            repo.create(&user).unwrap();
            (user, token)
        }

        fn upload_request(token: &str, field: &str, filename: &str, mime: &str, data: &[u8]) -> Request<Body> {
            let mut body = Vec::new();
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"{field}\"; filename=\"{filename}\"\r\n\
                     Content-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

            Request::builder()
                .method("PATCH")
                .uri("/api/users/avatars")
                .header("Authorization", format!("Bearer {token}"))
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap()
        }

        async fn error_message(response: axum::response::Response) -> String {
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            value["message"].as_str().unwrap().to_string()
        }

        fn stored_avatar_url(state: &AppState, user: &StoredUser) -> String {
            UserRepository::new(&state.storage)
                .get(&user.id)
                .unwrap()
                .avatar_url
        }

        fn sample_png() -> Vec<u8> {
            let img = image::ImageBuffer::from_pixel(16, 16, image::Rgb::<u8>([1, 2, 3]));
            let mut bytes = Vec::new();
            image::DynamicImage::ImageRgb8(img)
                .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
                .expect("encode sample");
            bytes
        }

        #[tokio::test]
        async fn oversized_upload_is_rejected_and_leaves_the_avatar_alone() {
            let (state, _dir) = test_state();
            let (user, token) = session(&state);

            let data = vec![0u8; MAX_AVATAR_BYTES + 1];
            let response = router(state.clone())
                .oneshot(upload_request(&token, "avatar", "big.png", "image/png", &data))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_message(response).await, "File exceeds the 2MB limit");
            assert_eq!(stored_avatar_url(&state, &user), "/avatars/old.png");
        }

        #[tokio::test]
        async fn non_image_extension_is_rejected() {
            let (state, _dir) = test_state();
            let (user, token) = session(&state);

            let response = router(state.clone())
                .oneshot(upload_request(
                    &token,
                    "avatar",
                    "script.exe",
                    "application/octet-stream",
                    b"MZ",
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_message(response).await, "Only image files are allowed");
            assert_eq!(stored_avatar_url(&state, &user), "/avatars/old.png");
        }

        #[tokio::test]
        async fn missing_avatar_field_is_rejected() {
            let (state, _dir) = test_state();
            let (user, token) = session(&state);

            let response = router(state.clone())
                .oneshot(upload_request(
                    &token,
                    "attachment",
                    "me.png",
                    "image/png",
                    &sample_png(),
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_message(response).await, "No file uploaded");
            assert_eq!(stored_avatar_url(&state, &user), "/avatars/old.png");
        }

        #[tokio::test]
        async fn undecodable_image_bytes_are_rejected() {
            let (state, _dir) = test_state();
            let (user, token) = session(&state);

            let response = router(state.clone())
                .oneshot(upload_request(
                    &token,
                    "avatar",
                    "broken.png",
                    "image/png",
                    b"not an image at all",
                ))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_message(response).await, "Only image files are allowed");
            assert_eq!(stored_avatar_url(&state, &user), "/avatars/old.png");
        }

        #[tokio::test]
        async fn valid_upload_updates_the_stored_avatar_url() {
            let (state, _dir) = test_state();
            let (user, token) = session(&state);

            let response = router(state.clone())
                .oneshot(upload_request(&token, "avatar", "me.png", "image/png", &sample_png()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            let url = value["avatarURL"].as_str().unwrap();
            assert!(url.starts_with(&format!("/avatars/avatar-{}-", user.id)));

            assert_eq!(stored_avatar_url(&state, &user), url);
            let file = std::path::Path::new(&state.config.public_dir)
                .join("avatars")
                .join(url.strip_prefix("/avatars/").unwrap());
            assert!(file.exists());
        }
    }
}
