// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Contact endpoints.
//!
//! Reads are public; every mutation requires authentication and, except for
//! creation, ownership of the contact.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateContactRequest, FavoriteRequest, MessageResponse, UpdateContactRequest},
    state::AppState,
    storage::repository::{ContactRepository, StoredContact},
    storage::OwnershipCheck,
    validate,
};

/// List all contacts.
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    responses(
        (status = 200, description = "All contacts", body = [StoredContact]),
        (status = 500, description = "Internal error"),
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredContact>>, ApiError> {
    let repo = ContactRepository::new(&state.storage);
    Ok(Json(repo.list_all()?))
}

/// Get a single contact by id.
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "The contact", body = StoredContact),
        (status = 404, description = "No such contact"),
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredContact>, ApiError> {
    let repo = ContactRepository::new(&state.storage);
    repo.find(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Not found"))
}

/// Create a contact owned by the authenticated user.
///
/// The owner always comes from the session, never from the body.
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    security(("bearer" = [])),
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Created contact", body = StoredContact),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(body): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<StoredContact>), ApiError> {
    let fields = validate::validate_new_contact(&body)?;

    let contact = StoredContact::new(
        fields.name,
        fields.email,
        fields.phone,
        fields.favorite,
        &user.id,
    );
    ContactRepository::new(&state.storage).create(&contact)?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Replace a contact's fields (name, email and phone all required).
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Contact id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Updated contact", body = StoredContact),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such contact"),
    )
)]
pub async fn put_contact(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
    Json(body): Json<UpdateContactRequest>,
) -> Result<Json<StoredContact>, ApiError> {
    let update = validate::validate_full_update(&body)?;

    let repo = ContactRepository::new(&state.storage);
    let mut contact = repo.find(&id)?.verify_owner(&user.id)?;
    update.apply(&mut contact);
    repo.update(&contact)?;

    Ok(Json(contact))
}

/// Update some of a contact's fields (at least one required).
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Contact id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Updated contact", body = StoredContact),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such contact"),
    )
)]
pub async fn patch_contact(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
    Json(body): Json<UpdateContactRequest>,
) -> Result<Json<StoredContact>, ApiError> {
    let update = validate::validate_partial_update(&body)?;

    let repo = ContactRepository::new(&state.storage);
    let mut contact = repo.find(&id)?.verify_owner(&user.id)?;
    update.apply(&mut contact);
    repo.update(&contact)?;

    Ok(Json(contact))
}

/// Set the favorite flag on a contact.
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}/favorite",
    tag = "Contacts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Contact id")),
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Updated contact", body = StoredContact),
        (status = 400, description = "Missing favorite field"),
        (status = 401, description = "Not authorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such contact"),
    )
)]
pub async fn update_favorite(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
    Json(body): Json<FavoriteRequest>,
) -> Result<Json<StoredContact>, ApiError> {
    let favorite = validate::validate_favorite(&body)?;

    let repo = ContactRepository::new(&state.storage);
    let mut contact = repo.find(&id)?.verify_owner(&user.id)?;
    contact.favorite = favorite;
    repo.update(&contact)?;

    Ok(Json(contact))
}

/// Delete a contact.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Not authorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "No such contact"),
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let repo = ContactRepository::new(&state.storage);
    repo.find(&id)?.verify_owner(&user.id)?;
    repo.delete(&id)?;

    Ok(Json(MessageResponse::new("Contact deleted")))
}
