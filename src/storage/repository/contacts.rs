// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Contact repository for document storage.
//!
//! Each contact is stored as a separate JSON document under
//! `{DATA_DIR}/contacts/`. The owner is set at creation from the
//! authenticated caller and never changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::super::{DocumentStorage, OwnedResource, StorageError, StorageResult};

/// Contact record on disk. Also serves as the API response shape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredContact {
    /// Unique contact identifier (UUID)
    pub id: String,
    /// Contact display name
    pub name: String,
    /// Contact email address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Favorite flag
    pub favorite: bool,
    /// Owner user id, immutable after creation
    pub owner: String,
    /// When the contact was created
    pub created_at: DateTime<Utc>,
}

impl StoredContact {
    /// Build a new contact owned by `owner`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        favorite: bool,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            favorite,
            owner: owner.into(),
            created_at: Utc::now(),
        }
    }
}

impl OwnedResource for StoredContact {
    fn owner_id(&self) -> &str {
        &self.owner
    }
}

/// Partial update applied by the PUT/PATCH handlers after validation.
/// Absent fields keep their stored value; `owner` is not updatable.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

impl ContactUpdate {
    /// Apply the update to a stored contact in place.
    pub fn apply(self, contact: &mut StoredContact) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
    }
}

/// Repository for contact operations on document storage.
pub struct ContactRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> ContactRepository<'a> {
    /// Create a new ContactRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a contact exists.
    pub fn exists(&self, contact_id: &str) -> bool {
        if Uuid::parse_str(contact_id).is_err() {
            return false;
        }
        self.storage
            .exists(self.storage.paths().contact(contact_id))
    }

    /// Get a contact by id, or `None` if absent.
    ///
    /// Ids are UUIDs; anything else (including path-like strings) resolves
    /// to `None` without ever touching the filesystem.
    pub fn find(&self, contact_id: &str) -> StorageResult<Option<StoredContact>> {
        if Uuid::parse_str(contact_id).is_err() {
            return Ok(None);
        }
        let path = self.storage.paths().contact(contact_id);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        self.storage.read_json(path).map(Some)
    }

    /// List all contacts (global list, no owner filter).
    pub fn list_all(&self) -> StorageResult<Vec<StoredContact>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().contacts_dir(), "json")?;

        let mut contacts = Vec::new();
        for id in ids {
            if let Some(contact) = self.find(&id)? {
                contacts.push(contact);
            }
        }

        Ok(contacts)
    }

    /// Create a new contact document.
    pub fn create(&self, contact: &StoredContact) -> StorageResult<()> {
        if self.exists(&contact.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Contact {}",
                contact.id
            )));
        }
        self.storage
            .write_json(self.storage.paths().contact(&contact.id), contact)
    }

    /// Update an existing contact document.
    pub fn update(&self, contact: &StoredContact) -> StorageResult<()> {
        if !self.exists(&contact.id) {
            return Err(StorageError::NotFound(format!("Contact {}", contact.id)));
        }
        self.storage
            .write_json(self.storage.paths().contact(&contact.id), contact)
    }

    /// Delete a contact.
    pub fn delete(&self, contact_id: &str) -> StorageResult<()> {
        if !self.exists(contact_id) {
            return Err(StorageError::NotFound(format!("Contact {contact_id}")));
        }
        self.storage
            .delete(self.storage.paths().contact(contact_id))
    }
}
