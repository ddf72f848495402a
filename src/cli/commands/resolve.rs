//! Resolve command: show the tag set without writing anything.

use std::path::Path;

use anyhow::Context;

use crate::catalog::LocalCatalog;
use crate::config::Config;
use crate::dispatcher::describe_fields;
use crate::tags::{TrackTemplate, resolve};

/// Print the resolved tags for catalog track `position`.
pub fn cmd_resolve(
    config: &Config,
    catalog_path: &Path,
    position: usize,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = LocalCatalog::open(catalog_path)?;
    let track = catalog
        .track(position)
        .with_context(|| format!("catalog has {} tracks, no position {}", catalog.len(), position))?;

    let resolution = resolve(config, &track, position, &catalog, &TrackTemplate)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution.tags)?);
        return Ok(());
    }

    for field in describe_fields(&resolution.tags, resolution.cover.is_some()) {
        println!("{field}");
    }
    if let Some(cover) = &resolution.cover {
        println!("Cover: {} bytes ({:?})", cover.data.len(), cover.source);
    }
    for raw in &resolution.skipped_overrides {
        println!("Skipped override: {raw}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_out_of_range_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let catalog = temp.path().join("album.json");
        std::fs::write(
            &catalog,
            r#"{"album": {"name": "A"}, "tracks": [{"name": "One", "index": 1}]}"#,
        )
        .unwrap();

        assert!(cmd_resolve(&Config::default(), &catalog, 0, true).is_ok());
        assert!(cmd_resolve(&Config::default(), &catalog, 5, false).is_err());
    }
}
