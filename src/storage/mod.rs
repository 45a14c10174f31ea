// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! # Document Storage Module
//!
//! Persistence for the two collections the service owns: users and
//! contacts. Each record is one JSON document on the local filesystem.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   users/{user_id}.json       # Credential records
//!   contacts/{contact_id}.json # Contact records
//!   tmp/                       # In-flight avatar uploads
//! ```
//!
//! Primary lookups are by id (one file open). Secondary lookups (user by
//! email, user by verification token, contacts by owner) are linear
//! directory scans, which is adequate at this service's scale.

mod document_fs;
mod ownership;
mod paths;
pub mod repository;

pub use document_fs::{DocumentStorage, StorageError, StorageResult};
pub use ownership::{OwnedResource, OwnershipCheck};
pub use paths::StoragePaths;
