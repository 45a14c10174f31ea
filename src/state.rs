// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::email::EmailService;
use crate::storage::DocumentStorage;

/// Shared application state.
///
/// Storage operations take `&self` and are atomic per document, so no lock
/// wraps the storage handle; concurrent writers are last-write-wins.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DocumentStorage>,
    pub config: Arc<AppConfig>,
    /// `None` when SMTP is not configured; mail sending is skipped.
    pub mailer: Option<EmailService>,
}

impl AppState {
    pub fn new(storage: DocumentStorage, config: AppConfig, mailer: Option<EmailService>) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
            mailer,
        }
    }

    /// State over a throwaway storage root, without mail.
    #[cfg(test)]
    pub fn for_tests(data_dir: &std::path::Path, jwt_secret: &str) -> Self {
        use crate::storage::StoragePaths;

        let mut storage = DocumentStorage::new(StoragePaths::new(data_dir));
        storage.initialize().expect("initialize test storage");

        let config = AppConfig {
            data_dir: data_dir.display().to_string(),
            public_dir: data_dir.join("public").display().to_string(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: jwt_secret.into(),
            base_url: "http://localhost:3000".into(),
            smtp: None,
        };

        Self::new(storage, config, None)
    }
}
