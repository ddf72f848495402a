//! Formats command.

use crate::adapters::{OutputFormat, TagAdapter};

/// One line per output format: name, codec and adapter.
pub fn format_table() -> Vec<String> {
    OutputFormat::ALL
        .into_iter()
        .map(|format| {
            let adapter = TagAdapter::for_format(format)
                .map(TagAdapter::name)
                .unwrap_or("not tagged");
            format!("{:<10}{:<32}{}", format.as_str(), format.codec_label(), adapter)
        })
        .collect()
}

/// List supported output formats
pub fn cmd_formats() {
    for line in format_table() {
        println!("{line}");
    }
}
