//! Tagging command.

use std::path::{Path, PathBuf};

use crate::adapters::OutputFormat;
use crate::catalog::LocalCatalog;
use crate::config::Config;
use crate::dispatcher::{TagOutcome, write_tags};
use crate::tags::TrackTemplate;

/// Tag `files[i]` with catalog track `start + i`.
///
/// Per-file failures are reported and counted; the batch always runs to the end.
pub fn cmd_tag(
    config: &Config,
    format_given: bool,
    catalog_path: &Path,
    start: usize,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let catalog = LocalCatalog::open(catalog_path)?;
    println!("Tagging {} files from {:?}", files.len(), catalog_path);

    let mut tagged = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        let position = start + i;
        let Some(mut track) = catalog.track(position) else {
            eprintln!(
                "ERROR: catalog has {} tracks, no entry for {:?} (position {})",
                catalog.len(),
                path,
                position
            );
            failed += 1;
            continue;
        };

        let file_config = config_for_file(config, format_given, path);
        match write_tags(&file_config, path, i, &mut track, &catalog, &TrackTemplate) {
            Ok(TagOutcome::Tagged(summary)) => {
                println!("{summary}");
                tagged += 1;
            }
            Ok(TagOutcome::Skipped(format)) => {
                println!("Skipping metadata tagging for {format} encoding: {:?}", path);
                skipped += 1;
            }
            Ok(TagOutcome::Failed { path, warning }) => {
                eprintln!("WARNING: could not tag {:?}: {}", path, warning);
                failed += 1;
            }
            Err(e) => {
                eprintln!("ERROR tagging {:?}: {}", path, e);
                failed += 1;
            }
        }
    }

    println!(
        "\nCompleted: {} tagged, {} skipped, {} failed",
        tagged, skipped, failed
    );
    Ok(())
}

/// The config for one file: the extension picks the format unless one was forced.
fn config_for_file(config: &Config, format_given: bool, path: &Path) -> Config {
    let mut file_config = config.clone();
    if !format_given && let Some(format) = OutputFormat::from_path(path) {
        file_config.output.format = format;
    }
    file_config
}
