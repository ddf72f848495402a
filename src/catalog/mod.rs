//! Catalog collaborators consumed by the tagging core.
//!
//! The tagging core never talks to a streaming service directly. It reads
//! track and album objects and asks a catalog client for genres and
//! high-resolution cover art through the traits in [`traits`].
//!
//! - [`traits`]: `CatalogTrack`, `CatalogAlbum`, `CatalogClient`
//! - [`local`]: an offline catalog described by a JSON file (used by the CLI)

pub mod local;
pub mod traits;

use serde::{Deserialize, Serialize};

pub use local::{LocalAlbum, LocalCatalog, LocalTrack};
pub use traits::{CatalogAlbum, CatalogClient, CatalogTrack};

/// One entry of an album's browse listing: where a sibling track sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseEntry {
    /// Disc number (1-based)
    pub disc: u32,
    /// Track index on that disc (1-based)
    pub index: u32,
}

impl BrowseEntry {
    pub fn new(disc: u32, index: u32) -> Self {
        Self { disc, index }
    }
}

/// Which catalog entity genres are looked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenrePreference {
    /// Genre lookup disabled
    #[default]
    None,
    /// Genres of the track's primary artist
    Artist,
    /// Genres of the track's album
    Album,
}

impl GenrePreference {
    /// Whether genres should be requested at all.
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }
}

impl std::str::FromStr for GenrePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(Self::None),
            "artist" => Ok(Self::Artist),
            "album" => Ok(Self::Album),
            other => Err(format!("unknown genre preference: {other}")),
        }
    }
}

/// Errors raised by catalog collaborators.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Timed out loading {0}")]
    Timeout(String),

    #[error("Failed to load {what}: {message}")]
    Load { what: String, message: String },

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Invalid catalog description: {0}")]
    Invalid(String),
}
