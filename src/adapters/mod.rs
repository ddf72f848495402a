//! Container adapters: write a resolved [`TagSet`] into one container's
//! native tag storage and persist it.
//!
//! The adapter is a pure function of the output format:
//!
//! | Format | Adapter |
//! |--------|---------|
//! | mp3, aiff | [`TagAdapter::EmbeddedId3`] |
//! | aac | [`TagAdapter::DetachedId3`] |
//! | flac, ogg, opus | [`TagAdapter::Vorbis`] |
//! | m4a, alac.m4a | [`TagAdapter::Mp4`] |
//!
//! `wav` and `pcm` carry no tags and have no adapter.

mod id3;
mod mp4;
mod vorbis;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::id3::v2::Id3v2Tag;
use lofty::mp4::Ilst;
use lofty::ogg::VorbisComments;
use lofty::picture::{MimeType, Picture, PictureType};
use serde::{Deserialize, Serialize};

use crate::cover::CoverImage;
use crate::error::{Error, Result};
use crate::tags::TagSet;

pub use id3::{fill_id3, read_id3, write_id3};
pub use mp4::{fill_ilst, read_ilst, write_mp4};
pub use vorbis::{PictureBlock, fill_vorbis_comments, read_vorbis, write_vorbis};

/// Container format produced by the audio pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "aiff")]
    Aiff,
    #[serde(rename = "aac")]
    Aac,
    #[serde(rename = "flac")]
    Flac,
    #[serde(rename = "ogg")]
    Ogg,
    #[serde(rename = "opus")]
    Opus,
    #[serde(rename = "m4a")]
    M4a,
    #[serde(rename = "alac.m4a")]
    AlacM4a,
    #[serde(rename = "wav")]
    Wav,
    #[serde(rename = "pcm")]
    Pcm,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 10] = [
        Self::Mp3,
        Self::Aiff,
        Self::Aac,
        Self::Flac,
        Self::Ogg,
        Self::Opus,
        Self::M4a,
        Self::AlacM4a,
        Self::Wav,
        Self::Pcm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Aiff => "aiff",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::M4a => "m4a",
            Self::AlacM4a => "alac.m4a",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Guess the format from a file name; `alac.m4a` needs the double extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".alac.m4a") {
            return Some(Self::AlacM4a);
        }
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "aif" | "aifc" => Some(Self::Aiff),
            "oga" => Some(Self::Ogg),
            "raw" => Some(Self::Pcm),
            other => other.parse().ok(),
        }
    }

    /// Raw PCM and WAV output is never tagged.
    pub fn is_untagged(self) -> bool {
        matches!(self, Self::Wav | Self::Pcm)
    }

    /// Lossless formats report bitrate derived from the sample format.
    pub fn is_lossless(self) -> bool {
        matches!(self, Self::Flac | Self::AlacM4a | Self::Aiff | Self::Wav | Self::Pcm)
    }

    /// Human-readable codec name for summaries.
    pub fn codec_label(self) -> &'static str {
        match self {
            Self::Mp3 => "MPEG Layer III",
            Self::Aiff => "Audio Interchange File Format",
            Self::Aac => "Advanced Audio Coding",
            Self::Flac => "Free Lossless Audio Codec",
            Self::Ogg => "Ogg Vorbis Codec",
            Self::Opus => "Opus Codec",
            Self::M4a => "MPEG-4 Part 14 Audio",
            Self::AlacM4a => "Apple Lossless",
            Self::Wav => "Waveform Audio",
            Self::Pcm => "Raw PCM",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| Error::unsupported_format(s))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What ended up in the container, for the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrittenTag {
    /// ID3v2 tag; `minor` is 3 or 4
    Id3 { minor: u8, frames: usize },
    /// Vorbis comment block with its vendor string
    Vorbis { vendor: String },
    /// iTunes-style `ilst` atoms
    Mp4,
}

impl fmt::Display for WrittenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id3 { minor, frames } => write!(f, "ID3 v2.{minor}: {frames} frames"),
            Self::Vorbis { vendor } => write!(f, "Vorbis comments - {vendor}"),
            Self::Mp4 => f.write_str("Apple iTunes metadata"),
        }
    }
}

/// One writer per container family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAdapter {
    /// ID3v2 frames inside the container (MP3, AIFF)
    EmbeddedId3,
    /// Standalone ID3v2 tag written over the file (AAC)
    DetachedId3,
    /// Vorbis comments (FLAC, OGG, Opus)
    Vorbis,
    /// MP4 atoms (M4A, ALAC)
    Mp4,
}

impl TagAdapter {
    /// Select the adapter for `format`.
    ///
    /// Formats without tag support are an error here; callers that want to
    /// skip them check [`OutputFormat::is_untagged`] first.
    pub fn for_format(format: OutputFormat) -> Result<Self> {
        match format {
            OutputFormat::Mp3 | OutputFormat::Aiff => Ok(Self::EmbeddedId3),
            OutputFormat::Aac => Ok(Self::DetachedId3),
            OutputFormat::Flac | OutputFormat::Ogg | OutputFormat::Opus => Ok(Self::Vorbis),
            OutputFormat::M4a | OutputFormat::AlacM4a => Ok(Self::Mp4),
            OutputFormat::Wav | OutputFormat::Pcm => Err(Error::unsupported_format(format.as_str())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EmbeddedId3 => "embedded ID3",
            Self::DetachedId3 => "detached ID3",
            Self::Vorbis => "Vorbis comments",
            Self::Mp4 => "MP4 atoms",
        }
    }

    /// Read the tag already stored in the container at `path`.
    ///
    /// This is where an unreadable or corrupt file is first noticed, before
    /// any metadata is resolved or artwork fetched.
    pub fn open(self, format: OutputFormat, path: &Path) -> Result<OpenContainer> {
        tracing::debug!("Opening {:?} for {} tags", path, self.name());

        let existing = match self {
            Self::EmbeddedId3 | Self::DetachedId3 => ExistingTag::Id3(read_id3(format, path)?),
            Self::Vorbis => ExistingTag::Vorbis(read_vorbis(format, path)?),
            Self::Mp4 => ExistingTag::Mp4(read_ilst(path)?),
        };

        Ok(OpenContainer {
            adapter: self,
            format,
            path: path.to_path_buf(),
            existing,
        })
    }
}

/// Tag storage read from a container, in its native form.
#[derive(Debug, Clone)]
pub enum ExistingTag {
    Id3(Id3v2Tag),
    Vorbis(VorbisComments),
    Mp4(Ilst),
}

/// A container whose existing tag has been read and is ready to be rewritten.
#[derive(Debug)]
pub struct OpenContainer {
    adapter: TagAdapter,
    format: OutputFormat,
    path: PathBuf,
    existing: ExistingTag,
}

impl OpenContainer {
    pub fn adapter(&self) -> TagAdapter {
        self.adapter
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `tags` (and `cover`, if any) over the existing tag and save.
    pub fn apply(
        self,
        tags: &TagSet,
        cover: Option<&CoverImage>,
        id3_v23: bool,
    ) -> Result<WrittenTag> {
        let path = self.path.as_path();
        tracing::debug!("Writing {} tags to {:?}", self.adapter.name(), path);

        match self.existing {
            ExistingTag::Id3(tag) => write_id3(tag, path, tags, cover, id3_v23),
            ExistingTag::Vorbis(comments) => write_vorbis(self.format, comments, path, tags, cover),
            ExistingTag::Mp4(ilst) => write_mp4(ilst, path, tags, cover),
        }
    }
}

/// Front-cover JPEG picture as every container expects it.
pub(crate) fn cover_picture(cover: &CoverImage) -> Picture {
    Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        Some(CoverImage::DESCRIPTION.to_string()),
        cover.data.clone(),
    )
}

pub(crate) fn parse_options() -> ParseOptions {
    ParseOptions::new().read_properties(false)
}

pub(crate) fn write_options(id3_v23: bool) -> WriteOptions {
    WriteOptions::new().use_id3v23(id3_v23)
}
