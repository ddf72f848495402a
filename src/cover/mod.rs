//! Cover art resolution and persistence.
//!
//! Cover art for a track is resolved once, with this priority:
//!
//! 1. **Large art** - high-resolution image from the catalog client (opt-in)
//! 2. **Album art** - the album's standard artwork
//!
//! Missing art is fine, it just resolves to `None`. Once resolved, the image
//! may be saved next to the audio file ([`sidecar`]) and/or handed to a
//! container adapter for embedding, depending on [`CoverFileMode`].

mod resolver;
mod sidecar;

pub use resolver::resolve_cover;
pub use sidecar::{prepare_embed, write_cover_file};

/// Where the cover image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSource {
    /// High-resolution lookup by track identity
    LargeArt,
    /// The album's standard artwork
    AlbumArt,
}

/// Encoded cover image (JPEG) for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub data: Vec<u8>,
    pub source: CoverSource,
}

impl CoverImage {
    pub fn new(data: Vec<u8>, source: CoverSource) -> Self {
        Self { data, source }
    }

    pub const MIME_TYPE: &'static str = "image/jpeg";
    pub const DESCRIPTION: &'static str = "Front Cover";
}

/// Whether the cover goes into the container, a side file, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CoverFileMode {
    /// Embed only
    #[default]
    EmbedOnly,
    /// Write `name` next to the audio file, do not embed
    FileOnly(String),
    /// Write `name` next to the audio file and embed
    FileAndEmbed(String),
}

impl CoverFileMode {
    /// "Save only" takes precedence when both names are configured.
    pub fn from_names(cover_file: Option<&str>, cover_file_and_embed: Option<&str>) -> Self {
        match (cover_file, cover_file_and_embed) {
            (Some(name), _) => Self::FileOnly(name.to_string()),
            (None, Some(name)) => Self::FileAndEmbed(name.to_string()),
            (None, None) => Self::EmbedOnly,
        }
    }

    pub fn embeds(&self) -> bool {
        !matches!(self, Self::FileOnly(_))
    }

    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::EmbedOnly => None,
            Self::FileOnly(name) | Self::FileAndEmbed(name) => Some(name),
        }
    }
}
