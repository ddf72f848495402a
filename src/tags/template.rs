//! Expansion of override templates against the current track.
//!
//! Tokens are written in braces, e.g. `"{artist} - {title}"`. The default
//! [`TrackTemplate`] expander understands:
//!
//! | Token | Value |
//! |---|---|
//! | `{title}`, `{track_name}` | track title |
//! | `{artist}` | primary artist |
//! | `{artists}` | all artists, comma-joined |
//! | `{album}` | album title |
//! | `{album_artist}` | album artist (empty if unknown) |
//! | `{year}` | release year |
//! | `{disc_num}` | disc number |
//! | `{track_num}` | index on disc, zero-padded to 2 digits |
//! | `{track_idx}` | index on disc |
//! | `{idx}` | position of the track in the current batch |
//!
//! Unknown tokens are left verbatim.

use crate::catalog::{CatalogAlbum, CatalogTrack};

/// Everything a template may refer to.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub idx: usize,
    pub title: &'a str,
    pub artists: &'a [String],
    pub album: &'a str,
    pub album_artist: Option<&'a str>,
    pub year: u32,
    pub disc: u32,
    pub track_idx: u32,
}

impl<'a> TemplateContext<'a> {
    pub fn from_track<T: CatalogTrack>(track: &'a T, idx: usize) -> Self {
        let album = track.album();
        Self {
            idx,
            title: track.name(),
            artists: track.artists(),
            album: album.name(),
            album_artist: album.artist(),
            year: album.year(),
            disc: track.disc(),
            track_idx: track.index(),
        }
    }

    fn token(&self, name: &str) -> Option<String> {
        let value = match name {
            "title" | "track_name" => self.title.to_string(),
            "artist" => self.artists.first().cloned().unwrap_or_default(),
            "artists" => self.artists.join(", "),
            "album" => self.album.to_string(),
            "album_artist" => self.album_artist.unwrap_or_default().to_string(),
            "year" => self.year.to_string(),
            "disc_num" => self.disc.to_string(),
            "track_num" => format!("{:02}", self.track_idx),
            "track_idx" => self.track_idx.to_string(),
            "idx" => self.idx.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Turns a template string into a literal string for one track.
pub trait TemplateExpander {
    fn expand(&self, template: &str, ctx: &TemplateContext<'_>) -> String;
}

/// Brace-token expander used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackTemplate;

impl TemplateExpander for TrackTemplate {
    fn expand(&self, template: &str, ctx: &TemplateContext<'_>) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        // Substituted values are never re-scanned for tokens
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    match ctx.token(name) {
                        Some(value) => out.push_str(&value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(artists: &[String]) -> TemplateContext<'_> {
        TemplateContext {
            idx: 7,
            title: "Song",
            artists,
            album: "Record",
            album_artist: Some("Band"),
            year: 1999,
            disc: 2,
            track_idx: 4,
        }
    }

    #[test]
    fn test_expand_title() {
        let artists = vec!["Band".to_string()];
        assert_eq!(TrackTemplate.expand("Custom {title}", &ctx(&artists)), "Custom Song");
    }

    #[test]
    fn test_expand_all_tokens() {
        let artists = vec!["Band".to_string(), "Guest".to_string()];
        let out = TrackTemplate.expand(
            "{artist}|{artists}|{album}|{album_artist}|{year}|{disc_num}|{track_num}|{track_idx}|{idx}|{track_name}",
            &ctx(&artists),
        );
        assert_eq!(out, "Band|Band, Guest|Record|Band|1999|2|04|4|7|Song");
    }

    #[test]
    fn test_unknown_and_unterminated_tokens_are_verbatim() {
        let artists: Vec<String> = vec![];
        let c = ctx(&artists);
        assert_eq!(TrackTemplate.expand("{nope} {title", &c), "{nope} {title");
        assert_eq!(TrackTemplate.expand("{artist}", &c), "");
        assert_eq!(TrackTemplate.expand("no tokens", &c), "no tokens");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let artists = vec!["{title}".to_string()];
        assert_eq!(TrackTemplate.expand("{artist}", &ctx(&artists)), "{title}");
    }
}
