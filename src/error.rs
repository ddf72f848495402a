//! Crate-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level error enum
//! - Module-specific errors (e.g., [`CatalogError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use trackstamp::error::{Error, Result};
//!
//! fn tag_file(path: &Path) -> Result<()> {
//!     let format = OutputFormat::from_str("flac")?; // Unsupported formats auto-convert
//!     track.load(timeout)?;                         // Catalog errors auto-convert
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use crate::catalog::CatalogError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tag library rejected a read or write of a container
    #[error("Tagging error for {path}: {message}")]
    Tagging { path: PathBuf, message: String },

    /// Catalog load/lookup error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// No adapter is registered for the requested output format
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a tagging error.
    pub fn tagging(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Tagging {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error came from the tag library (possibly wrapped in context).
    ///
    /// The dispatcher downgrades these to warnings; everything else propagates.
    pub fn is_tagging(&self) -> bool {
        match self {
            Self::Tagging { .. } => true,
            Self::WithContext { source, .. } => source.is_tagging(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

/// Extension trait turning container read/write failures into
/// [`Error::Tagging`] for a given file.
pub trait TaggingResultExt<T> {
    /// Attach the container path to the failure.
    fn for_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> TaggingResultExt<T> for std::result::Result<T, lofty::error::LoftyError> {
    fn for_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::tagging(path, e.to_string()))
    }
}

impl<T> TaggingResultExt<T> for std::result::Result<T, std::io::Error> {
    fn for_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| Error::tagging(path, e.to_string()))
    }
}
