//! Vorbis comment reader and writer for FLAC, OGG Vorbis and Opus.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use lofty::error::LoftyError;
use lofty::file::AudioFile;
use lofty::flac::FlacFile;
use lofty::ogg::{OggPictureStorage, OpusFile, VorbisComments, VorbisFile};
use lofty::picture::{PictureInformation, PictureType};
use lofty::tag::TagExt;

use crate::cover::CoverImage;
use crate::error::{Error, Result, TaggingResultExt};
use crate::tags::TagSet;

use super::{OutputFormat, WrittenTag, cover_picture, parse_options, write_options};

/// Key holding a base64 FLAC picture block in Ogg streams.
pub const PICTURE_KEY: &str = "METADATA_BLOCK_PICTURE";

const FLAC_MAGIC: &[u8; 4] = b"fLaC";
const FLAC_PADDING: u8 = 1;
const LAST_BLOCK: u8 = 0x80;

/// How the cover is stored in the comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureBlock {
    /// FLAC PICTURE metadata block
    Native,
    /// Base64 picture block in a text field (Ogg Vorbis, Opus)
    Encoded,
}

impl PictureBlock {
    pub fn for_format(format: OutputFormat) -> Self {
        if format == OutputFormat::Flac {
            Self::Native
        } else {
            Self::Encoded
        }
    }
}

/// Populate `comments` with every field of `tags`.
///
/// Index and total go into separate keys; genres are joined with `", "`.
/// A new cover replaces any front cover already present.
pub fn fill_vorbis_comments(
    comments: &mut VorbisComments,
    tags: &TagSet,
    cover: Option<&CoverImage>,
    block: PictureBlock,
) -> std::result::Result<(), LoftyError> {
    if let Some(cover) = cover {
        comments.remove_picture_type(PictureType::CoverFront);
        let picture = cover_picture(cover);
        match block {
            PictureBlock::Native => {
                comments.insert_picture(picture, Some(PictureInformation::default()))?;
            }
            PictureBlock::Encoded => {
                let bytes = picture.as_flac_bytes(PictureInformation::default(), false);
                comments.insert(PICTURE_KEY.to_string(), STANDARD.encode(bytes));
            }
        }
    }

    let mut set = |key: &str, value: String| comments.insert(key.to_string(), value);

    if let Some(album) = tags.album() {
        set("ALBUM", album.to_string());
    }
    set("TITLE", tags.title().to_string());
    set("ARTIST", tags.artists().to_string());
    if let Some(album_artist) = tags.album_artist() {
        set("ALBUMARTIST", album_artist.to_string());
    }

    set("DATE", tags.year());
    set("YEAR", tags.year());
    set("DISCNUMBER", tags.disc_idx());
    set("DISCTOTAL", tags.num_discs());
    set("TRACKNUMBER", tags.track_idx());
    set("TRACKTOTAL", tags.num_tracks());

    if let Some(comment) = tags.comment() {
        set("COMMENT", comment.to_string());
    }
    if let Some(grouping) = tags.grouping() {
        set("GROUPING", grouping.to_string());
    }
    if let Some(genres) = tags.genres() {
        set("GENRE", genres.join(", "));
    }

    Ok(())
}

/// The comment block already in a FLAC, OGG or Opus file.
///
/// FLAC keeps pictures in their own metadata blocks; they are carried over
/// so a rewrite without a new cover leaves the artwork in place.
pub fn read_vorbis(format: OutputFormat, path: &Path) -> Result<VorbisComments> {
    let mut file = fs::File::open(path).for_path(path)?;
    let comments = match format {
        OutputFormat::Flac => {
            let flac = FlacFile::read_from(&mut file, parse_options()).for_path(path)?;
            let mut comments = flac.vorbis_comments().cloned().unwrap_or_default();
            for (picture, info) in flac.pictures() {
                comments
                    .insert_picture(picture.clone(), Some(*info))
                    .for_path(path)?;
            }
            comments
        }
        OutputFormat::Ogg => VorbisFile::read_from(&mut file, parse_options())
            .for_path(path)?
            .vorbis_comments()
            .clone(),
        OutputFormat::Opus => OpusFile::read_from(&mut file, parse_options())
            .for_path(path)?
            .vorbis_comments()
            .clone(),
        other => return Err(Error::unsupported_format(other.as_str())),
    };
    Ok(comments)
}

/// Make the FLAC metadata chain end in a PADDING block.
///
/// lofty only moves the last-block flag when it finds a trailing PADDING
/// block; otherwise the rewritten comment blocks end up after the flagged
/// block and are read as frame data.
fn ensure_trailing_padding(path: &Path) -> Result<()> {
    let truncated = || Error::tagging(path, "truncated FLAC metadata");

    let mut bytes = fs::read(path).for_path(path)?;
    if !bytes.starts_with(FLAC_MAGIC) {
        return Err(Error::tagging(path, "missing fLaC marker"));
    }

    let mut pos = FLAC_MAGIC.len();
    loop {
        let header = bytes.get(pos..pos + 4).ok_or_else(truncated)?;
        let size = u32::from_be_bytes([0, header[1], header[2], header[3]]) as usize;
        let end = pos + 4 + size;
        if end > bytes.len() {
            return Err(truncated());
        }

        if header[0] & LAST_BLOCK == 0 {
            pos = end;
            continue;
        }
        if header[0] & !LAST_BLOCK == FLAC_PADDING {
            return Ok(());
        }

        bytes[pos] &= !LAST_BLOCK;
        bytes.splice(end..end, [LAST_BLOCK | FLAC_PADDING, 0, 0, 0]);
        tracing::debug!("Terminating FLAC metadata with a PADDING block in {:?}", path);
        return fs::write(path, bytes).for_path(path);
    }
}

/// Fill `comments` and save them to the FLAC, OGG or Opus file at `path`.
///
/// FLAC is written without extra padding so the frame data after the
/// metadata blocks is left untouched.
pub fn write_vorbis(
    format: OutputFormat,
    mut comments: VorbisComments,
    path: &Path,
    tags: &TagSet,
    cover: Option<&CoverImage>,
) -> Result<WrittenTag> {
    fill_vorbis_comments(&mut comments, tags, cover, PictureBlock::for_format(format))
        .for_path(path)?;

    if format == OutputFormat::Flac {
        ensure_trailing_padding(path)?;
    }
    comments
        .save_to_path(path, write_options(false).preferred_padding(0))
        .for_path(path)?;

    Ok(WrittenTag::Vorbis {
        vendor: comments.vendor().to_string(),
    })
}
