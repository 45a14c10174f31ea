// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Typed repositories over the document storage.

mod contacts;
mod users;

pub use contacts::{ContactRepository, ContactUpdate, StoredContact};
pub use users::{StoredUser, UserRepository};
