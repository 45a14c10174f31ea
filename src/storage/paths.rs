// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Path constants and utilities for the document storage layout.

use std::path::{Path, PathBuf};

/// Default root directory for persistent documents.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities for the document filesystem.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persistent data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user documents.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user document.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Contact Paths ==========

    /// Directory containing all contact documents.
    pub fn contacts_dir(&self) -> PathBuf {
        self.root.join("contacts")
    }

    /// Path to a specific contact document.
    pub fn contact(&self, contact_id: &str) -> PathBuf {
        self.contacts_dir().join(format!("{contact_id}.json"))
    }

    // ========== Upload Paths ==========

    /// Scratch directory for in-flight avatar uploads.
    pub fn tmp_dir(&self) -> PathBuf {
        self.root.join("tmp")
    }
}
