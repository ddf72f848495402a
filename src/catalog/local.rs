//! Offline catalog described by a JSON file.
//!
//! Lets the CLI tag files without a live catalog service. Paths to cover
//! images are resolved relative to the JSON file's directory.
//!
//! ```json
//! {
//!   "album": { "name": "Blue Train", "artist": "John Coltrane", "year": 1957,
//!              "cover": "cover.jpg", "genres": ["Jazz"] },
//!   "tracks": [
//!     { "name": "Blue Train", "artists": ["John Coltrane"], "disc": 1, "index": 1,
//!       "genres": ["Hard Bop"], "large_cover": "cover-large.jpg" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::traits::{CatalogAlbum, CatalogClient, CatalogTrack};
use super::{BrowseEntry, CatalogError, GenrePreference};

/// Album section of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumDescription {
    pub name: String,
    pub artist: Option<String>,
    pub year: u32,
    /// Standard artwork, relative to the catalog file
    pub cover: Option<PathBuf>,
    /// Genres returned for [`GenrePreference::Album`]
    pub genres: Vec<String>,
}

/// Track entry of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDescription {
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default = "default_disc")]
    pub disc: u32,
    pub index: u32,
    /// Genres returned for [`GenrePreference::Artist`]
    #[serde(default)]
    pub genres: Vec<String>,
    /// High-resolution artwork, relative to the catalog file
    #[serde(default)]
    pub large_cover: Option<PathBuf>,
}

fn default_disc() -> u32 {
    1
}

impl TrackDescription {
    fn resolved_uri(&self) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| format!("local:track:{}:{}", self.disc, self.index))
    }
}

/// Parsed catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub album: AlbumDescription,
    pub tracks: Vec<TrackDescription>,
}

/// Offline catalog: one album and its tracks.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    base_dir: PathBuf,
    file: CatalogFile,
}

impl LocalCatalog {
    /// Read a catalog description from disk.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Load {
            what: path.display().to_string(),
            message: e.to_string(),
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json(&contents, base_dir)
    }

    /// Parse a catalog description; relative paths resolve against `base_dir`.
    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Invalid(e.to_string()))?;
        if file.tracks.is_empty() {
            return Err(CatalogError::Invalid("catalog lists no tracks".to_string()));
        }
        Ok(Self {
            base_dir: base_dir.into(),
            file,
        })
    }

    /// Number of tracks in the catalog.
    pub fn len(&self) -> usize {
        self.file.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.tracks.is_empty()
    }

    /// Build the track object at `position` (0-based, in file order).
    pub fn track(&self, position: usize) -> Option<LocalTrack> {
        let desc = self.file.tracks.get(position)?;
        Some(LocalTrack {
            name: desc.name.clone(),
            uri: desc.resolved_uri(),
            artists: desc.artists.clone(),
            disc: desc.disc,
            index: desc.index,
            album: self.album(),
        })
    }

    fn album(&self) -> LocalAlbum {
        let album = &self.file.album;
        LocalAlbum {
            name: album.name.clone(),
            artist: album.artist.clone(),
            year: album.year,
            cover: album.cover.as_ref().map(|p| self.base_dir.join(p)),
            entries: self
                .file
                .tracks
                .iter()
                .map(|t| BrowseEntry::new(t.disc, t.index))
                .collect(),
        }
    }

    fn find(&self, track_uri: &str) -> Option<&TrackDescription> {
        self.file.tracks.iter().find(|t| t.resolved_uri() == track_uri)
    }
}

impl CatalogClient for LocalCatalog {
    fn get_genres(
        &self,
        preference: GenrePreference,
        track_uri: &str,
    ) -> Result<Option<Vec<String>>, CatalogError> {
        let genres = match preference {
            GenrePreference::None => return Ok(None),
            GenrePreference::Album => self.file.album.genres.clone(),
            GenrePreference::Artist => self
                .find(track_uri)
                .map(|t| t.genres.clone())
                .unwrap_or_default(),
        };
        Ok((!genres.is_empty()).then_some(genres))
    }

    fn get_large_coverart(&self, track_uri: &str) -> Result<Option<Vec<u8>>, CatalogError> {
        let Some(path) = self.find(track_uri).and_then(|t| t.large_cover.as_ref()) else {
            return Ok(None);
        };
        read_image(&self.base_dir.join(path))
    }
}

/// Album object backed by a catalog file.
#[derive(Debug, Clone)]
pub struct LocalAlbum {
    name: String,
    artist: Option<String>,
    year: u32,
    cover: Option<PathBuf>,
    entries: Vec<BrowseEntry>,
}

impl CatalogAlbum for LocalAlbum {
    fn name(&self) -> &str {
        &self.name
    }

    fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    fn year(&self) -> u32 {
        self.year
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn load(&mut self, _timeout: Duration) -> Result<(), CatalogError> {
        Ok(())
    }

    fn browse(&self, _timeout: Duration) -> Result<Vec<BrowseEntry>, CatalogError> {
        Ok(self.entries.clone())
    }

    fn cover(&self, _timeout: Duration) -> Result<Option<Vec<u8>>, CatalogError> {
        match &self.cover {
            Some(path) => read_image(path),
            None => Ok(None),
        }
    }
}

/// Track object backed by a catalog file.
#[derive(Debug, Clone)]
pub struct LocalTrack {
    name: String,
    uri: String,
    artists: Vec<String>,
    disc: u32,
    index: u32,
    album: LocalAlbum,
}

impl CatalogTrack for LocalTrack {
    type Album = LocalAlbum;

    fn name(&self) -> &str {
        &self.name
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn artists(&self) -> &[String] {
        &self.artists
    }

    fn disc(&self) -> u32 {
        self.disc
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn album(&self) -> &LocalAlbum {
        &self.album
    }

    fn album_mut(&mut self) -> &mut LocalAlbum {
        &mut self.album
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn load(&mut self, _timeout: Duration) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// Missing image files are "no artwork", not an error.
fn read_image(path: &Path) -> Result<Option<Vec<u8>>, CatalogError> {
    if !path.exists() {
        tracing::debug!("Cover image {:?} does not exist", path);
        return Ok(None);
    }
    std::fs::read(path).map(Some).map_err(|e| CatalogError::Load {
        what: path.display().to_string(),
        message: e.to_string(),
    })
}
