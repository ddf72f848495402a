//! Trackstamp - metadata tagging for freshly encoded audio files.
//!
//! Resolves one canonical tag set per track from catalog objects, lookups
//! and user overrides, then writes it into the output container (ID3,
//! Vorbis comments or MP4 atoms) together with the cover art.

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cover;
pub mod dispatcher;
pub mod error;
pub mod tags;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("trackstamp=info".parse()?))
        .init();

    cli::run_command(&args)
}
