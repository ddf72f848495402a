//! Command-line interface for trackstamp.
//!
//! This module provides CLI commands for tagging encoded files from an
//! offline catalog description and for inspecting resolved tags.

mod commands;

pub use commands::{Cli, Commands, TagOptions, effective_config, run_command};
