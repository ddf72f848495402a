//! `field=template` override directives.

use std::str::FromStr;

use crate::config::Config;

/// Fields a directive may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverridableField {
    Album,
    Title,
    Artists,
    AlbumArtist,
    Year,
    NumDiscs,
    NumTracks,
    Comment,
    Grouping,
    Genres,
}

impl OverridableField {
    pub const ALL: [OverridableField; 10] = [
        Self::Album,
        Self::Title,
        Self::Artists,
        Self::AlbumArtist,
        Self::Year,
        Self::NumDiscs,
        Self::NumTracks,
        Self::Comment,
        Self::Grouping,
        Self::Genres,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Album => "album",
            Self::Title => "title",
            Self::Artists => "artists",
            Self::AlbumArtist => "album_artist",
            Self::Year => "year",
            Self::NumDiscs => "num_discs",
            Self::NumTracks => "num_tracks",
            Self::Comment => "comment",
            Self::Grouping => "grouping",
            Self::Genres => "genres",
        }
    }
}

impl FromStr for OverridableField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for OverridableField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed directive, template not yet expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideDirective {
    pub field: OverridableField,
    pub template: String,
}

/// Why a raw directive string was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// No `=` separator
    MissingSeparator,
    /// Field outside the allow-list
    UnknownField(String),
}

impl OverrideDirective {
    /// Parse `field=template`, splitting on the first `=` after trimming.
    pub fn parse(raw: &str) -> Result<Self, DirectiveError> {
        let (field, template) = raw
            .trim()
            .split_once('=')
            .ok_or(DirectiveError::MissingSeparator)?;
        let field = field.parse().map_err(DirectiveError::UnknownField)?;
        Ok(Self {
            field,
            template: template.to_string(),
        })
    }
}

/// The ordered directive list for one resolution.
///
/// Comment and grouping values from the config come first, so a user
/// directive for the same field is applied later and wins.
pub fn directive_list(config: &Config) -> Vec<String> {
    let tags = &config.tags;
    let synthetic = [
        tags.comment.as_ref().map(|c| format!("comment={c}")),
        tags.grouping.as_ref().map(|g| format!("grouping={g}")),
    ];
    synthetic
        .into_iter()
        .flatten()
        .chain(tags.overrides.iter().cloned())
        .collect()
}
