// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for user/contact documents | `./data` |
//! | `PUBLIC_DIR` | Root directory for publicly served files | `./public` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `JWT_SECRET` | HS256 signing secret for session tokens | Required |
//! | `BASE_URL` | External base URL used in verification links | `http://localhost:3000` |
//! | `SMTP_HOST` | SMTP relay host | Optional (mail disabled) |
//! | `SMTP_PORT` | SMTP relay port | `587` |
//! | `SMTP_USERNAME` | SMTP credentials | Required with `SMTP_HOST` |
//! | `SMTP_PASSWORD` | SMTP credentials | Required with `SMTP_HOST` |
//! | `SMTP_FROM` | Sender address for outbound mail | Required with `SMTP_HOST` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the document storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the public (static) file root.
pub const PUBLIC_DIR_ENV: &str = "PUBLIC_DIR";

/// Environment variable name for the JWT signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Session token lifetime in seconds (one hour).
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Maximum accepted avatar upload size (2 MiB).
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// SMTP relay settings. All-or-nothing: mail is disabled when unset.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: String,
    pub public_dir: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub base_url: String,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    /// Returns an error message when `JWT_SECRET` is missing or empty, or
    /// when the SMTP variables are only partially set.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var(JWT_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("{JWT_SECRET_ENV} must be set"))?;

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid port number".to_string())?;

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) if !host.is_empty() => {
                let port: u16 = env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .map_err(|_| "SMTP_PORT must be a valid port number".to_string())?;
                Some(SmtpConfig {
                    host,
                    port,
                    username: env::var("SMTP_USERNAME")
                        .map_err(|_| "SMTP_USERNAME must be set with SMTP_HOST".to_string())?,
                    password: env::var("SMTP_PASSWORD")
                        .map_err(|_| "SMTP_PASSWORD must be set with SMTP_HOST".to_string())?,
                    from: env::var("SMTP_FROM")
                        .map_err(|_| "SMTP_FROM must be set with SMTP_HOST".to_string())?,
                })
            }
            _ => None,
        };

        Ok(Self {
            data_dir: env::var(DATA_DIR_ENV).unwrap_or_else(|_| "./data".to_string()),
            public_dir: env::var(PUBLIC_DIR_ENV).unwrap_or_else(|_| "./public".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            jwt_secret,
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            smtp,
        })
    }

    /// Build a verification link for the given token.
    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/verify/{token}", self.base_url.trim_end_matches('/'))
    }
}
