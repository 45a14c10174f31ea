// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Rolodex Contributors

//! Avatar handling: gravatar defaults and the upload/resize pipeline.
//!
//! Uploads land in the storage tmp directory first, are resized to a fixed
//! square, written into the public avatars directory, and the temp file is
//! removed. The stored avatar URL is only updated by the caller after the
//! resized file exists, so a crash mid-pipeline can leak a temp file but
//! never points a user at a missing avatar.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Utc;
use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Square avatar edge length in pixels.
const AVATAR_SIZE: u32 = 250;

/// Accepted upload extensions (lowercased).
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Errors from the avatar pipeline.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// I/O failure writing or removing files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The upload could not be decoded or re-encoded as an image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Default avatar URL for an email address (gravatar, SHA-256 scheme).
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    let mut hash = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hash, "{byte:02x}");
    }
    format!("https://www.gravatar.com/avatar/{hash}?s={AVATAR_SIZE}&d=retro")
}

/// Return the lowercased extension when the filename is allow-listed.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Run the upload through the resize pipeline.
///
/// Writes `bytes` to `tmp_dir`, resizes to [`AVATAR_SIZE`] square, stores
/// the result under `{public_dir}/avatars/avatar-{user_id}-{millis}.{ext}`
/// and returns the public URL path (`/avatars/...`).
pub fn store_avatar(
    tmp_dir: &Path,
    public_dir: &Path,
    user_id: &str,
    ext: &str,
    bytes: &[u8],
) -> Result<String, AvatarError> {
    fs::create_dir_all(tmp_dir)?;
    let tmp_path = tmp_dir.join(format!("{}-upload.{ext}", Uuid::new_v4()));
    fs::write(&tmp_path, bytes)?;

    let result = resize_into_public(&tmp_path, public_dir, user_id, ext);

    // The original upload is never kept, success or not.
    if let Err(err) = fs::remove_file(&tmp_path) {
        tracing::warn!(path = %tmp_path.display(), error = %err, "failed to remove temp upload");
    }

    result
}

fn resize_into_public(
    tmp_path: &Path,
    public_dir: &Path,
    user_id: &str,
    ext: &str,
) -> Result<String, AvatarError> {
    let avatars_dir = public_dir.join("avatars");
    fs::create_dir_all(&avatars_dir)?;

    let filename = format!("avatar-{user_id}-{}.{ext}", Utc::now().timestamp_millis());
    let target = avatars_dir.join(&filename);

    let resized = image::open(tmp_path)?.resize_exact(AVATAR_SIZE, AVATAR_SIZE, FilterType::Triangle);
    resized.save(&target)?;

    Ok(format!("/avatars/{filename}"))
}
