//! Tag resolution: from catalog objects to one canonical tag set.
//!
//! The resolved [`TagSet`] is format-independent. Container adapters in
//! [`crate::adapters`] only read it.
//!
//! # Field access
//!
//! Text getters return the ASCII rendering when ASCII-only output is
//! configured, unless the caller asks for [`TextForm::Display`] explicitly.
//! Integer fields are exposed as strings; index/total pairs as `"N/M"`
//! (or `"N"` when the total is unknown).

mod overrides;
mod resolver;
mod template;
mod value;

use serde::Serialize;

pub use overrides::{DirectiveError, OverridableField, OverrideDirective, directive_list};
pub use resolver::{Resolution, resolve};
pub use template::{TemplateContext, TemplateExpander, TrackTemplate};
pub use value::{AsciiPolicy, TagValue, to_ascii};

/// Which rendering a text getter returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextForm {
    /// ASCII when the tag set was built for ASCII-only output, display otherwise
    #[default]
    Configured,
    /// Always the display rendering
    Display,
}

/// Format `idx` with its total, e.g. `"5/12"`, or just `"5"` without a total.
pub fn idx_of_total(idx: u32, total: u32) -> String {
    if total > 0 {
        format!("{idx}/{total}")
    } else {
        idx.to_string()
    }
}

/// Resolved metadata for one track, ready to be written to a container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagSet {
    pub(crate) ascii_only: bool,
    pub(crate) album: Option<TagValue>,
    pub(crate) artists: TagValue,
    pub(crate) album_artist: Option<TagValue>,
    pub(crate) title: TagValue,
    pub(crate) year: u32,
    pub(crate) disc_idx: u32,
    pub(crate) num_discs: u32,
    pub(crate) track_idx: u32,
    pub(crate) num_tracks: u32,
    pub(crate) genres: Option<Vec<TagValue>>,
    pub(crate) comment: Option<TagValue>,
    pub(crate) grouping: Option<TagValue>,
}

impl TagSet {
    fn pick<'a>(&self, value: &'a TagValue, form: TextForm) -> &'a str {
        value.form(self.ascii_only && form == TextForm::Configured)
    }

    fn pick_opt<'a>(&self, value: Option<&'a TagValue>, form: TextForm) -> Option<&'a str> {
        value.map(|v| self.pick(v, form))
    }

    pub fn album(&self) -> Option<&str> {
        self.album_in(TextForm::Configured)
    }

    pub fn album_in(&self, form: TextForm) -> Option<&str> {
        self.pick_opt(self.album.as_ref(), form)
    }

    pub fn title(&self) -> &str {
        self.title_in(TextForm::Configured)
    }

    pub fn title_in(&self, form: TextForm) -> &str {
        self.pick(&self.title, form)
    }

    pub fn artists(&self) -> &str {
        self.artists_in(TextForm::Configured)
    }

    pub fn artists_in(&self, form: TextForm) -> &str {
        self.pick(&self.artists, form)
    }

    pub fn album_artist(&self) -> Option<&str> {
        self.album_artist_in(TextForm::Configured)
    }

    pub fn album_artist_in(&self, form: TextForm) -> Option<&str> {
        self.pick_opt(self.album_artist.as_ref(), form)
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment_in(TextForm::Configured)
    }

    pub fn comment_in(&self, form: TextForm) -> Option<&str> {
        self.pick_opt(self.comment.as_ref(), form)
    }

    pub fn grouping(&self) -> Option<&str> {
        self.grouping_in(TextForm::Configured)
    }

    pub fn grouping_in(&self, form: TextForm) -> Option<&str> {
        self.pick_opt(self.grouping.as_ref(), form)
    }

    /// Genres in catalog order; `None` when nothing was resolved.
    pub fn genres(&self) -> Option<Vec<&str>> {
        self.genres_in(TextForm::Configured)
    }

    pub fn genres_in(&self, form: TextForm) -> Option<Vec<&str>> {
        self.genres
            .as_ref()
            .map(|genres| genres.iter().map(|g| self.pick(g, form)).collect())
    }

    pub fn year(&self) -> String {
        self.year.to_string()
    }

    pub fn disc_idx(&self) -> String {
        self.disc_idx.to_string()
    }

    pub fn num_discs(&self) -> String {
        self.num_discs.to_string()
    }

    pub fn track_idx(&self) -> String {
        self.track_idx.to_string()
    }

    pub fn num_tracks(&self) -> String {
        self.num_tracks.to_string()
    }

    /// `"N/M"` track position.
    pub fn track_idx_and_total(&self) -> String {
        idx_of_total(self.track_idx, self.num_tracks)
    }

    /// `"N/M"` disc position.
    pub fn disc_idx_and_total(&self) -> String {
        idx_of_total(self.disc_idx, self.num_discs)
    }

    /// (index, total) for containers that store the pair natively.
    pub fn track_pair(&self) -> (u32, u32) {
        (self.track_idx, self.num_tracks)
    }

    pub fn disc_pair(&self) -> (u32, u32) {
        (self.disc_idx, self.num_discs)
    }

    pub fn year_value(&self) -> u32 {
        self.year
    }
}
