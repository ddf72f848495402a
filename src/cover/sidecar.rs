//! Cover art side files next to the audio file (cover.jpg, folder.jpg, ...).
//!
//! The existence check and the write are not atomic. Two writers racing on
//! the same directory both produce a valid image; which one lands is
//! unspecified.

use std::path::{Path, PathBuf};

use super::{CoverFileMode, CoverImage};

/// Write `cover` as `file_name` in the audio file's directory.
///
/// Returns the written path, or `None` if the file already existed.
pub fn write_cover_file(
    audio_path: &Path,
    file_name: &str,
    cover: &CoverImage,
) -> std::io::Result<Option<PathBuf>> {
    let dir = audio_path.parent().unwrap_or_else(|| Path::new("."));
    let cover_path = dir.join(file_name);

    if cover_path.exists() {
        tracing::debug!("Cover file {:?} already exists, leaving it", cover_path);
        return Ok(None);
    }

    std::fs::write(&cover_path, &cover.data)?;
    tracing::debug!("Wrote cover file {:?}", cover_path);
    Ok(Some(cover_path))
}

/// Apply the cover side channel and decide what the adapter should embed.
///
/// A failed side-file write is logged and does not prevent embedding.
pub fn prepare_embed<'a>(
    mode: &CoverFileMode,
    audio_path: &Path,
    cover: Option<&'a CoverImage>,
) -> Option<&'a CoverImage> {
    let cover = cover?;

    if let Some(name) = mode.file_name()
        && let Err(e) = write_cover_file(audio_path, name, cover)
    {
        tracing::warn!("Failed to write cover file {} for {:?}: {}", name, audio_path, e);
    }

    mode.embeds().then_some(cover)
}
