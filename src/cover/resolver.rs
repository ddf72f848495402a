//! Cover art resolver - one fallback chain per track.
//!
//! Resolves cover art with this priority:
//! 1. High-resolution art from the catalog client (if enabled)
//! 2. The album's standard artwork, loaded with the catalog timeout
//!
//! Lookup failures fall through to the next source; running out of sources
//! is not an error.

use crate::catalog::{CatalogAlbum, CatalogClient, CatalogTrack};
use crate::config::Config;

use super::{CoverImage, CoverSource};

/// Resolve the cover image for `track`.
pub fn resolve_cover<T, C>(config: &Config, track: &T, client: &C) -> Option<CoverImage>
where
    T: CatalogTrack,
    C: CatalogClient,
{
    // Priority 1: large art by track identity
    if config.cover.large_cover_art {
        match client.get_large_coverart(track.uri()) {
            Ok(Some(data)) => return Some(CoverImage::new(data, CoverSource::LargeArt)),
            Ok(None) => tracing::debug!("No large cover art for {}", track.uri()),
            Err(e) => tracing::warn!("Large cover art lookup failed for {}: {}", track.uri(), e),
        }
    }

    // Priority 2: standard album artwork
    match track.album().cover(config.timeout()) {
        Ok(Some(data)) => Some(CoverImage::new(data, CoverSource::AlbumArt)),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Album cover load failed for {}: {}", track.album().name(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::traits::mocks::{MockAlbum, MockClient, MockTrack};

    fn track_with_album_cover(cover: Option<&[u8]>) -> MockTrack {
        let mut album = MockAlbum::new("Album", "Band", 2000);
        if let Some(cover) = cover {
            album = album.with_cover(cover);
        }
        MockTrack::new("Song", &["Band"], 1, 1, album)
    }

    #[test]
    fn test_large_art_preferred_when_enabled() {
        let mut config = Config::default();
        config.cover.large_cover_art = true;
        let client = MockClient::empty().with_large_cover(b"large");
        let track = track_with_album_cover(Some(b"small"));

        let cover = resolve_cover(&config, &track, &client).unwrap();
        assert_eq!(cover.data, b"large");
        assert_eq!(cover.source, CoverSource::LargeArt);
    }

    #[test]
    fn test_large_art_not_requested_when_disabled() {
        let config = Config::default();
        let client = MockClient::empty().with_large_cover(b"large");
        let track = track_with_album_cover(Some(b"small"));

        let cover = resolve_cover(&config, &track, &client).unwrap();
        assert_eq!(cover.source, CoverSource::AlbumArt);
        assert_eq!(client.cover_calls.get(), 0);
    }

    #[test]
    fn test_falls_back_to_album_art() {
        let mut config = Config::default();
        config.cover.large_cover_art = true;
        let client = MockClient::empty();
        let track = track_with_album_cover(Some(b"small"));

        let cover = resolve_cover(&config, &track, &client).unwrap();
        assert_eq!(cover.data, b"small");
        assert_eq!(client.cover_calls.get(), 1);
    }

    #[test]
    fn test_lookup_error_falls_back() {
        let mut config = Config::default();
        config.cover.large_cover_art = true;
        let client = MockClient {
            cover_error: true,
            ..MockClient::empty()
        };
        let track = track_with_album_cover(Some(b"small"));

        let cover = resolve_cover(&config, &track, &client).unwrap();
        assert_eq!(cover.source, CoverSource::AlbumArt);
    }

    #[test]
    fn test_no_cover_anywhere() {
        let mut config = Config::default();
        config.cover.large_cover_art = true;
        let track = track_with_album_cover(None);
        assert!(resolve_cover(&config, &track, &MockClient::empty()).is_none());
    }
}
