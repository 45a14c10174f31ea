// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Supporting services: password hashing, outbound email, avatars.

pub mod avatar;
pub mod email;
pub mod password;
