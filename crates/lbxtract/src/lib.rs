//! LBX extractor library
//!
//! This library provides the directory scanning, filesystem output and
//! reporting behind the `lbxtract` command. Archive parsing lives in
//! [`lbx_formats`].

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod discovery;
pub mod error;
pub mod fs_writer;
pub mod output;
pub mod runner;

pub use config::{ExtractConfig, LogLevel};
pub use error::{ConfigError, ExtractError};
pub use fs_writer::FsWriter;
pub use output::{ArchiveReport, OutputFormat, OutputStyle};
pub use runner::{Extractor, RunSummary};
