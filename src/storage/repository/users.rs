// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! User repository for document storage.
//!
//! Each user is stored as a separate JSON document under
//! `{DATA_DIR}/users/`. The document includes the argon2 password hash and
//! the current session token; neither is ever serialized into an API
//! response (handlers project through `UserResponse`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Subscription;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// User record on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// Login email, unique across users, stored lowercased
    pub email: String,
    /// Argon2 PHC-format password hash
    pub password_hash: String,
    /// Subscription tier
    pub subscription: Subscription,
    /// Current session token; `None` unless logged in. Only the most
    /// recent token is remembered, so re-login revokes prior sessions.
    pub token: Option<String>,
    /// Avatar URL (gravatar-derived default until an upload replaces it)
    pub avatar_url: String,
    /// Whether the email address has been verified
    pub verified: bool,
    /// Single-use verification token; cleared when verification succeeds
    pub verification_token: Option<String>,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Build a fresh unverified user with a new verification token.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.into(),
            password_hash: password_hash.into(),
            subscription: Subscription::Starter,
            token: None,
            avatar_url: avatar_url.into(),
            verified: false,
            verification_token: Some(Uuid::new_v4().to_string()),
            created_at: Utc::now(),
        }
    }
}

/// Repository for user operations on document storage.
pub struct UserRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        if Uuid::parse_str(user_id).is_err() {
            return false;
        }
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by id, or `None` if absent.
    ///
    /// Ids are UUIDs; anything else (including path-like strings) resolves
    /// to `None` without ever touching the filesystem.
    pub fn find(&self, user_id: &str) -> StorageResult<Option<StoredUser>> {
        if Uuid::parse_str(user_id).is_err() {
            return Ok(None);
        }
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Ok(None);
        }
        self.storage.read_json(path).map(Some)
    }

    /// Get a user by id.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        self.find(user_id)?
            .ok_or_else(|| StorageError::NotFound(format!("User {user_id}")))
    }

    /// Find a user by email (linear scan over the users directory).
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let needle = email.to_lowercase();
        for id in self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?
        {
            if let Some(user) = self.find(&id)? {
                if user.email == needle {
                    return Ok(Some(user));
                }
            }
        }
        Ok(None)
    }

    /// Find a user holding the given verification token.
    pub fn find_by_verification_token(&self, token: &str) -> StorageResult<Option<StoredUser>> {
        for id in self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?
        {
            if let Some(user) = self.find(&id)? {
                if user.verification_token.as_deref() == Some(token) {
                    return Ok(Some(user));
                }
            }
        }
        Ok(None)
    }

    /// Create a new user document.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        if self.exists(&user.id) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.id)));
        }
        self.storage
            .write_json(self.storage.paths().user(&user.id), user)
    }

    /// Update an existing user document.
    pub fn update(&self, user: &StoredUser) -> StorageResult<()> {
        if !self.exists(&user.id) {
            return Err(StorageError::NotFound(format!("User {}", user.id)));
        }
        self.storage
            .write_json(self.storage.paths().user(&user.id), user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_storage() -> (DocumentStorage, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut storage = DocumentStorage::new(StoragePaths::new(dir.path()));
        storage.initialize().expect("initialize");
        (storage, dir)
    }

    fn test_user(email: &str) -> StoredUser {
        StoredUser::new(email, "$argon2id$fake", "https://example.com/a.png")
    }

    #[test]
    fn new_users_start_unverified_with_a_token() {
        let user = test_user("a@example.com");
        assert!(!user.verified);
        assert!(user.verification_token.is_some());
        assert!(user.token.is_none());
        assert_eq!(user.subscription, Subscription::Starter);
    }

    #[test]
    fn create_and_get_user() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("a@example.com");
        repo.create(&user).unwrap();

        let loaded = repo.get(&user.id).unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn create_twice_errors() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("a@example.com");
        repo.create(&user).unwrap();
        assert!(matches!(
            repo.create(&user),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn find_by_email_is_case_insensitive_on_input() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        repo.create(&test_user("a@example.com")).unwrap();
        repo.create(&test_user("b@example.com")).unwrap();

        let found = repo.find_by_email("A@Example.COM").unwrap();
        assert_eq!(found.map(|u| u.email), Some("a@example.com".to_string()));
        assert!(repo.find_by_email("c@example.com").unwrap().is_none());
    }

    #[test]
    fn find_by_verification_token_matches_only_the_holder() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let user = test_user("a@example.com");
        let token = user.verification_token.clone().unwrap();
        repo.create(&user).unwrap();
        repo.create(&test_user("b@example.com")).unwrap();

        let found = repo.find_by_verification_token(&token).unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(repo
            .find_by_verification_token("no-such-token")
            .unwrap()
            .is_none());
    }

    #[test]
    fn update_persists_changes() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);

        let mut user = test_user("a@example.com");
        repo.create(&user).unwrap();

        user.token = Some("jwt".to_string());
        user.verified = true;
        user.verification_token = None;
        repo.update(&user).unwrap();

        let loaded = repo.get(&user.id).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("jwt"));
        assert!(loaded.verified);
        assert!(loaded.verification_token.is_none());
    }

    #[test]
    fn update_missing_user_errors() {
        let (storage, _dir) = test_storage();
        let repo = UserRepository::new(&storage);
        let user = test_user("a@example.com");
        assert!(matches!(
            repo.update(&user),
            Err(StorageError::NotFound(_))
        ));
    }
}
