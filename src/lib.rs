// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Rolodex - Contacts Management REST API
//!
//! Users and contacts persisted as JSON documents, JWT session
//! authentication with a single active session per user, owner-guarded
//! contact mutations, avatar upload with resize, and email verification.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session tokens and the authentication guard
//! - `services` - Password hashing, outbound email, avatars
//! - `storage` - JSON document storage and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod validate;
