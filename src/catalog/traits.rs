//! Trait definitions for catalog collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code plugs in a real catalog, while tests substitute the
//! mock implementations in [`mocks`].
//!
//! All calls are synchronous and may block the calling thread; the only
//! bound on blocking is the timeout the caller passes in.
//!
//! # Example
//!
//! ```ignore
//! use trackstamp::catalog::traits::{CatalogClient, CatalogTrack};
//!
//! fn genres_for<T: CatalogTrack, C: CatalogClient>(client: &C, track: &T) {
//!     let genres = client.get_genres(GenrePreference::Artist, track.uri())?;
//! }
//! ```

use std::time::Duration;

use super::{BrowseEntry, CatalogError, GenrePreference};

/// An album object from the catalog.
pub trait CatalogAlbum {
    /// Album title.
    fn name(&self) -> &str;

    /// Album artist name, if the catalog knows one.
    fn artist(&self) -> Option<&str>;

    /// Release year.
    fn year(&self) -> u32;

    fn is_loaded(&self) -> bool;

    /// Load the album's details, blocking for at most `timeout`.
    fn load(&mut self, timeout: Duration) -> Result<(), CatalogError>;

    /// Enumerate the (disc, index) position of every track on the album.
    fn browse(&self, timeout: Duration) -> Result<Vec<BrowseEntry>, CatalogError>;

    /// Standard album artwork as encoded JPEG bytes.
    fn cover(&self, timeout: Duration) -> Result<Option<Vec<u8>>, CatalogError>;
}

/// A track object from the catalog.
pub trait CatalogTrack {
    type Album: CatalogAlbum;

    /// Track title.
    fn name(&self) -> &str;

    /// Stable identity used for cover and genre lookups.
    fn uri(&self) -> &str;

    /// Artist names, primary artist first.
    fn artists(&self) -> &[String];

    /// Disc number (1-based).
    fn disc(&self) -> u32;

    /// Index on the disc (1-based).
    fn index(&self) -> u32;

    fn album(&self) -> &Self::Album;

    fn album_mut(&mut self) -> &mut Self::Album;

    fn is_loaded(&self) -> bool;

    /// Load the track's details, blocking for at most `timeout`.
    fn load(&mut self, timeout: Duration) -> Result<(), CatalogError>;
}

/// Catalog web client for lookups that are not part of the track object.
pub trait CatalogClient {
    /// Genres for a track, ordered by relevance. `None` when unknown.
    fn get_genres(
        &self,
        preference: GenrePreference,
        track_uri: &str,
    ) -> Result<Option<Vec<String>>, CatalogError>;

    /// High-resolution cover art for a track. `None` when unavailable.
    fn get_large_coverart(&self, track_uri: &str) -> Result<Option<Vec<u8>>, CatalogError>;
}
