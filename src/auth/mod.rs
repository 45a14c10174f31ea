// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! # Authentication Module
//!
//! Session authentication with server-issued HS256 JWTs.
//!
//! ## Auth Flow
//!
//! 1. Login signs a JWT (`sub` = user id, one hour expiry) with
//!    `JWT_SECRET` and stores it in the user's `token` field.
//! 2. Clients send `Authorization: Bearer <token>`.
//! 3. The `Auth` extractor:
//!    - verifies signature and expiry,
//!    - resolves `sub` to a stored user,
//!    - requires the stored session token to equal the presented token.
//!
//! Because only the most recent token is stored, logout or a fresh login
//! invalidates every previously issued token for that user, expiry aside.
//!
//! All rejections surface as 401 `{"message": "Not authorized"}`. The
//! concrete reason is logged, never returned.

pub mod claims;
pub mod error;
pub mod extractor;

pub use claims::{issue_token, verify_token, Claims};
pub use error::AuthError;
pub use extractor::Auth;
