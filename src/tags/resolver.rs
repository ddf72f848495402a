//! Build a [`TagSet`] from catalog objects, lookups and overrides.
//!
//! Steps run in a fixed order because later steps may overwrite earlier ones:
//!
//! 1. Browse the album to derive disc/track totals
//! 2. Base fields from the track and album objects
//! 3. Genres from the catalog client (optional)
//! 4. Cover image (large art, then album art)
//! 5. Override directives, in list order

use crate::catalog::{BrowseEntry, CatalogAlbum, CatalogClient, CatalogTrack};
use crate::config::Config;
use crate::cover::{CoverImage, resolve_cover};
use crate::error::Result;

use super::overrides::{DirectiveError, OverridableField, OverrideDirective, directive_list};
use super::template::{TemplateContext, TemplateExpander};
use super::value::{AsciiPolicy, TagValue};
use super::TagSet;

/// Output of a resolution: the tag set and the cover it owns.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub tags: TagSet,
    pub cover: Option<CoverImage>,
    /// Directives that were reported and skipped
    pub skipped_overrides: Vec<String>,
}

/// Resolve the tag set for `track`, the `idx`-th track of the current batch.
///
/// Fails only if the album cannot be browsed; lookup failures for genres
/// and cover art are logged and skipped.
pub fn resolve<T, C, E>(
    config: &Config,
    track: &T,
    idx: usize,
    client: &C,
    expander: &E,
) -> Result<Resolution>
where
    T: CatalogTrack,
    C: CatalogClient,
    E: TemplateExpander,
{
    let policy = config.ascii_policy();
    let album = track.album();

    let siblings = album.browse(config.timeout())?;
    let (num_discs, num_tracks) = totals(&siblings, track.disc(), track.index());

    let artists = if config.tags.all_artists {
        track.artists().join(", ")
    } else {
        track.artists().first().cloned().unwrap_or_default()
    };

    let mut tags = TagSet {
        ascii_only: config.output.ascii_only,
        album: Some(TagValue::new(album.name(), policy)),
        artists: TagValue::new(artists, policy),
        album_artist: album.artist().map(|a| TagValue::new(a, policy)),
        title: TagValue::new(track.name(), policy),
        year: album.year(),
        disc_idx: track.disc(),
        num_discs,
        track_idx: track.index(),
        num_tracks,
        genres: None,
        comment: None,
        grouping: None,
    };

    if config.tags.genres.is_enabled() {
        match client.get_genres(config.tags.genres, track.uri()) {
            Ok(Some(genres)) if !genres.is_empty() => {
                tags.genres = Some(genres.iter().map(|g| TagValue::new(g, policy)).collect());
            }
            Ok(_) => tracing::debug!("No genres for {}", track.uri()),
            Err(e) => tracing::warn!("Genre lookup failed for {}: {}", track.uri(), e),
        }
    }

    let cover = resolve_cover(config, track, client);

    let ctx = TemplateContext::from_track(track, idx);
    let mut skipped_overrides = Vec::new();
    for raw in directive_list(config) {
        let directive = match OverrideDirective::parse(&raw) {
            Ok(directive) => directive,
            Err(DirectiveError::MissingSeparator) => continue,
            Err(DirectiveError::UnknownField(field)) => {
                tracing::warn!("Cannot override tag: {}", field);
                skipped_overrides.push(raw);
                continue;
            }
        };

        let expanded = expander.expand(&directive.template, &ctx);
        if let Err(e) = apply_override(&mut tags, directive.field, &expanded, policy) {
            tracing::warn!("{}", e);
            skipped_overrides.push(raw);
        }
    }

    Ok(Resolution {
        tags,
        cover,
        skipped_overrides,
    })
}

/// Highest disc number on the album, and highest index on the track's disc.
fn totals(siblings: &[BrowseEntry], disc: u32, index: u32) -> (u32, u32) {
    if siblings.is_empty() {
        return (0, 0);
    }

    let num_discs = siblings.iter().map(|s| s.disc).max().unwrap_or(0).max(disc);
    let num_tracks = siblings
        .iter()
        .filter(|s| s.disc == disc)
        .map(|s| s.index)
        .max()
        .unwrap_or(0)
        .max(index);
    (num_discs, num_tracks)
}

fn apply_override(
    tags: &mut TagSet,
    field: OverridableField,
    value: &str,
    policy: AsciiPolicy,
) -> std::result::Result<(), String> {
    let text = || TagValue::new(value, policy);
    match field {
        OverridableField::Album => tags.album = Some(text()),
        OverridableField::Title => tags.title = text(),
        OverridableField::Artists => tags.artists = text(),
        OverridableField::AlbumArtist => tags.album_artist = Some(text()),
        OverridableField::Comment => tags.comment = Some(text()),
        OverridableField::Grouping => tags.grouping = Some(text()),
        // A genre override replaces the whole list
        OverridableField::Genres => tags.genres = Some(vec![text()]),
        OverridableField::Year => tags.year = parse_number(field, value)?,
        OverridableField::NumDiscs => tags.num_discs = parse_number(field, value)?,
        OverridableField::NumTracks => tags.num_tracks = parse_number(field, value)?,
    }
    Ok(())
}

fn parse_number(field: OverridableField, value: &str) -> std::result::Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Cannot override {field} with non-numeric value {value:?}"))
}
