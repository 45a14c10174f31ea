// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Ownership enforcement for contact mutations.
//!
//! The same owner comparison guards every mutating contact endpoint, so it
//! lives here once instead of being repeated per handler. Read endpoints do
//! not apply it: reads are public, writes are private.

use crate::error::ApiError;

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// Get the owner's user id.
    fn owner_id(&self) -> &str;
}

/// Extension trait applying the ownership check to a lookup result.
///
/// A missing resource maps to 404 before the owner is ever considered, so a
/// non-owner cannot distinguish "not yours" from "never existed" only for
/// absent ids.
pub trait OwnershipCheck<T> {
    /// Return the resource if it exists and belongs to `user_id`.
    ///
    /// # Errors
    /// 404 when the resource is absent, 403 when it belongs to someone else.
    fn verify_owner(self, user_id: &str) -> Result<T, ApiError>;
}

impl<T: OwnedResource> OwnershipCheck<T> for Option<T> {
    fn verify_owner(self, user_id: &str) -> Result<T, ApiError> {
        match self {
            Some(resource) => {
                if resource.owner_id() == user_id {
                    Ok(resource)
                } else {
                    Err(ApiError::forbidden())
                }
            }
            None => Err(ApiError::not_found("Not found")),
        }
    }
}
