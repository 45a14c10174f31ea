// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::MAX_AVATAR_BYTES,
    models::{
        AvatarResponse, CreateContactRequest, FavoriteRequest, LoginRequest, LoginResponse,
        MessageResponse, ResendVerifyRequest, SignupRequest, SignupResponse, Subscription,
        UpdateContactRequest, UserResponse,
    },
    state::AppState,
    storage::repository::StoredContact,
};

pub mod contacts;
pub mod health;
pub mod users;
pub mod verify;

pub fn router(state: AppState) -> Router {
    let avatars_dir = Path::new(&state.config.public_dir).join("avatars");

    let api_routes = Router::new()
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/contacts/{id}",
            get(contacts::get_contact)
                .put(contacts::put_contact)
                .patch(contacts::patch_contact)
                .delete(contacts::delete_contact),
        )
        .route("/contacts/{id}/favorite", patch(contacts::update_favorite))
        .route("/users/signup", post(users::signup))
        .route("/users/login", post(users::login))
        .route("/users/logout", get(users::logout))
        .route("/users/current", get(users::current))
        .route("/users/avatars", patch(users::update_avatar))
        .route("/verify/{token}", get(verify::verify_email))
        .route("/verify", post(verify::resend_verification))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state)
        .nest_service("/avatars", ServeDir::new(avatars_dir))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Upload limit plus multipart framing overhead
        .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        contacts::list_contacts,
        contacts::get_contact,
        contacts::create_contact,
        contacts::put_contact,
        contacts::patch_contact,
        contacts::update_favorite,
        contacts::delete_contact,
        users::signup,
        users::login,
        users::logout,
        users::current,
        users::update_avatar,
        verify::verify_email,
        verify::resend_verification,
        health::health,
        health::ready
    ),
    components(
        schemas(
            StoredContact,
            CreateContactRequest,
            UpdateContactRequest,
            FavoriteRequest,
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            ResendVerifyRequest,
            UserResponse,
            Subscription,
            AvatarResponse,
            MessageResponse
        )
    ),
    tags(
        (name = "Contacts", description = "Contacts collection"),
        (name = "Users", description = "Signup, login and session management"),
        (name = "Verify", description = "Email verification"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
