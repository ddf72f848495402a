//! Per-file tagging entry point.
//!
//! [`write_tags`] runs the whole pipeline for one freshly encoded file:
//! load catalog objects, open the container, resolve the tag set, persist
//! the cover side file, write the tags and describe the result.
//!
//! Failure policy:
//! - Unsupported output format and catalog failures propagate as errors
//! - Tag library failures (corrupt container, rejected write, I/O on save)
//!   are logged and returned as [`TagOutcome::Failed`]; the audio file is
//!   left as it was and the caller moves on to the next track

mod summary;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use summary::{
    AudioLine, Summary, SummaryField, TechnicalLine, channel_layout, describe_fields,
    format_duration, format_size,
};

use crate::adapters::{OutputFormat, TagAdapter};
use crate::catalog::{CatalogAlbum, CatalogClient, CatalogTrack};
use crate::config::Config;
use crate::cover::prepare_embed;
use crate::error::{Error, Result};
use crate::tags::{TemplateExpander, resolve};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// The output format carries no tags
    Skipped(OutputFormat),
    /// Tags were written
    Tagged(Box<Summary>),
    /// The tag library failed; the file is untouched apart from any cover side file
    Failed { path: PathBuf, warning: String },
}

/// Tag the file at `path` for `track`, the `idx`-th track of the batch.
pub fn write_tags<T, C, E>(
    config: &Config,
    path: &Path,
    idx: usize,
    track: &mut T,
    client: &C,
    expander: &E,
) -> Result<TagOutcome>
where
    T: CatalogTrack,
    C: CatalogClient,
    E: TemplateExpander,
{
    let format = config.output.format;
    if format.is_untagged() {
        tracing::info!("Skipping metadata tagging for {} encoding", format);
        return Ok(TagOutcome::Skipped(format));
    }
    let adapter = TagAdapter::for_format(format)?;

    ensure_loaded(track, config.timeout())?;

    // An unreadable container fails before any catalog lookups or cover writes
    let container = match adapter.open(format, path) {
        Ok(container) => container,
        Err(e) if e.is_tagging() => return Ok(failed(path, e)),
        Err(e) => return Err(e),
    };

    let resolution = resolve(config, &*track, idx, client, expander)?;
    let embed = prepare_embed(&config.cover_file_mode(), path, resolution.cover.as_ref());

    let container = match container.apply(&resolution.tags, embed, config.output.id3_v23) {
        Ok(container) => container,
        Err(e) if e.is_tagging() => return Ok(failed(path, e)),
        Err(e) => return Err(e),
    };

    let audio = match AudioLine::probe(path, format) {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::warn!("Could not read stream properties of {:?}: {}", path, e);
            None
        }
    };

    let summary = Summary {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_size: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        fields: describe_fields(&resolution.tags, embed.is_some()),
        skipped_overrides: resolution.skipped_overrides,
        technical: TechnicalLine {
            format,
            cbr: config.output.cbr,
            audio,
            container,
        },
    };
    tracing::debug!("Tagged {:?} with {} adapter", path, adapter.name());

    Ok(TagOutcome::Tagged(Box::new(summary)))
}

fn failed(path: &Path, e: Error) -> TagOutcome {
    tracing::warn!("Failed to tag {:?}: {}", path, e);
    TagOutcome::Failed {
        path: path.to_path_buf(),
        warning: e.to_string(),
    }
}

/// Load the track and its album if the catalog has not done so yet.
fn ensure_loaded<T: CatalogTrack>(track: &mut T, timeout: Duration) -> Result<()> {
    if !track.is_loaded() {
        tracing::debug!("Loading track {}", track.uri());
        track.load(timeout)?;
    }
    if !track.album().is_loaded() {
        tracing::debug!("Loading album {}", track.album().name());
        track.album_mut().load(timeout)?;
    }
    Ok(())
}
