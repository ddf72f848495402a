//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `tag`: Tag encoded files from a catalog description
//! - `resolve`: Print the resolved tag set without touching files
//! - `formats`: List output formats and their adapters
//! - `init_config`: Write the effective configuration to the config dir

mod formats;
mod resolve;
mod tag;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::adapters::OutputFormat;
use crate::catalog::GenrePreference;
use crate::config::{self, Config};

pub use formats::cmd_formats;
pub use resolve::cmd_resolve;
pub use tag::cmd_tag;

/// Trackstamp CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Write tags to encoded files, one catalog track per file in order
    Tag {
        /// JSON catalog describing the album and its tracks
        #[arg(short, long)]
        catalog: PathBuf,
        /// Catalog position (0-based) of the first file
        #[arg(long, default_value = "0")]
        start: usize,
        /// Audio files to tag
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        options: TagOptions,
    },
    /// Show the tag set that would be written for one catalog track
    Resolve {
        /// JSON catalog describing the album and its tracks
        #[arg(short, long)]
        catalog: PathBuf,
        /// Catalog position (0-based) of the track
        #[arg(short, long, default_value = "0")]
        track: usize,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        options: TagOptions,
    },
    /// List supported output formats
    Formats,
    /// Save the effective configuration (file + flags) as the new default
    InitConfig {
        #[command(flatten)]
        options: TagOptions,
    },
}

/// Flags layered over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct TagOptions {
    /// Output format (mp3, aiff, aac, flac, ogg, opus, m4a, alac.m4a, wav, pcm);
    /// guessed from each file's extension when omitted
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
    /// Return ASCII transliterations from tag getters
    #[arg(long)]
    pub ascii_only: bool,
    /// Write ID3 v2.3 instead of v2.4
    #[arg(long)]
    pub id3_v23: bool,
    /// Audio was encoded at a constant bitrate
    #[arg(long)]
    pub cbr: bool,
    /// Join all track artists instead of using the first one
    #[arg(long)]
    pub all_artists: bool,
    /// Genre lookup: none, artist or album
    #[arg(long)]
    pub genres: Option<GenrePreference>,
    /// Comment to add to every track
    #[arg(long)]
    pub comment: Option<String>,
    /// Grouping to add to every track
    #[arg(long)]
    pub grouping: Option<String>,
    /// Override a tag with a template, e.g. `title={track_num} {title}` (repeatable)
    #[arg(short = 'O', long = "override", value_name = "FIELD=TEMPLATE")]
    pub overrides: Vec<String>,
    /// Prefer high-resolution cover art
    #[arg(long)]
    pub large_cover_art: bool,
    /// Save the cover next to each file under this name instead of embedding
    #[arg(long, conflicts_with = "cover_file_and_embed")]
    pub cover_file: Option<String>,
    /// Save the cover next to each file under this name and embed it
    #[arg(long)]
    pub cover_file_and_embed: Option<String>,
    /// Catalog timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl TagOptions {
    /// Apply the flags that were given on top of `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.output.ascii_only |= self.ascii_only;
        config.output.id3_v23 |= self.id3_v23;
        config.output.cbr |= self.cbr;

        config.tags.all_artists |= self.all_artists;
        if let Some(genres) = self.genres {
            config.tags.genres = genres;
        }
        if self.comment.is_some() {
            config.tags.comment = self.comment.clone();
        }
        if self.grouping.is_some() {
            config.tags.grouping = self.grouping.clone();
        }
        config.tags.overrides.extend(self.overrides.iter().cloned());

        config.cover.large_cover_art |= self.large_cover_art;
        if self.cover_file.is_some() {
            config.cover.cover_file = self.cover_file.clone();
            config.cover.cover_file_and_embed = None;
        }
        if self.cover_file_and_embed.is_some() {
            config.cover.cover_file_and_embed = self.cover_file_and_embed.clone();
            config.cover.cover_file = None;
        }
        if let Some(timeout) = self.timeout {
            config.catalog.timeout_secs = timeout;
        }
    }
}

/// Load the config file (explicit path or default location) and layer `options` on top.
pub fn effective_config(path: Option<&Path>, options: &TagOptions) -> Config {
    let mut config = match path {
        Some(path) => config::load_from(path),
        None => config::load(),
    };
    options.apply_to(&mut config);
    config
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Tag {
            catalog,
            start,
            files,
            options,
        } => {
            let config = effective_config(config_path, options);
            cmd_tag(&config, options.format.is_some(), catalog, *start, files)
        }
        Commands::Resolve {
            catalog,
            track,
            json,
            options,
        } => {
            let config = effective_config(config_path, options);
            cmd_resolve(&config, catalog, *track, *json)
        }
        Commands::Formats => {
            cmd_formats();
            Ok(())
        }
        Commands::InitConfig { options } => {
            let config = effective_config(config_path, options);
            config::save(&config)?;
            println!("Configuration saved to {:?}", config::config_path());
            Ok(())
        }
    }
}
