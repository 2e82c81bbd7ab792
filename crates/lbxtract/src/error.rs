//! Error types for the extractor.

use lbx_formats::LbxError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input directory does not exist
    #[error("Input directory not found: {0}")]
    MissingInput(PathBuf),

    /// Input path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// No directory given and the executable location is unknown
    #[error("Cannot locate the executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),
}

/// Errors raised while extracting archives.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Listing the input directory failed
    #[error("Failed to list {path}: {source}")]
    Discover {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: walkdir::Error,
    },

    /// Archive file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadArchive {
        /// Archive path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Archive is malformed
    #[error("Malformed archive {archive}.LBX: {source}")]
    Parse {
        /// Archive name
        archive: String,
        /// Parser error
        #[source]
        source: LbxError,
    },

    /// Output directory could not be created
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        /// Directory path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing an extracted resource failed
    #[error("Failed to write resources of {archive}.LBX: {source}")]
    Write {
        /// Archive name
        archive: String,
        /// Parser or I/O error
        #[source]
        source: LbxError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ExtractError {
    /// Whether the run has to stop instead of moving on to the next archive
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Discover { .. } | Self::CreateDir { .. } | Self::Config(_)
        )
    }
}
