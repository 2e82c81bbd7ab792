//! Extraction run over a directory of archives
//!
//! Archives are processed one after another. A broken archive is reported
//! and skipped; only failures that leave no place to write output stop
//! the run.

use crate::config::ExtractConfig;
use crate::discovery::{archive_name, find_archives};
use crate::error::ExtractError;
use crate::fs_writer::FsWriter;
use crate::output::{ArchiveReport, FileReport, OutputFormat, OutputStyle, format_error, format_warning};
use lbx_formats::LbxArchive;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Totals of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Archives found in the input directory
    pub archives: usize,
    /// Archives skipped because of an error
    pub failed: usize,
    /// Resources written (or planned, on a dry run)
    pub files: usize,
}

/// Drives extraction of every archive in a directory
#[derive(Debug, Clone)]
pub struct Extractor {
    input_dir: PathBuf,
    output_root: PathBuf,
    format: OutputFormat,
    dry_run: bool,
    style: OutputStyle,
}

impl Extractor {
    /// Create an extractor from a validated configuration
    pub fn new(config: &ExtractConfig) -> Result<Self, ExtractError> {
        let input_dir = config.input_dir()?;
        let output_root = config.output_root(&input_dir);
        let style = if config.no_color {
            OutputStyle::new().no_color()
        } else {
            OutputStyle::new()
        };
        Ok(Self {
            input_dir,
            output_root,
            format: config.format,
            dry_run: config.dry_run,
            style,
        })
    }

    /// Directory where `EXTRACTED/<NAME>` directories are created
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Extract every archive in the input directory.
    ///
    /// Per-archive failures are printed to stderr and counted; fatal
    /// errors are returned.
    pub fn run(&self) -> Result<RunSummary, ExtractError> {
        let archives = find_archives(&self.input_dir)?;
        let mut summary = RunSummary {
            archives: archives.len(),
            ..RunSummary::default()
        };

        if archives.is_empty() {
            eprintln!(
                "{}",
                format_warning("No .LBX files found at this location", self.style)
            );
            return Ok(summary);
        }
        info!(
            "found {} archive(s) in {}",
            archives.len(),
            self.input_dir.display()
        );

        for path in &archives {
            match self.process(path) {
                Ok(report) => {
                    summary.files += report.files.len();
                    println!("{}", report.render(self.format));
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    eprintln!("{}", format_error(&err.to_string(), self.style));
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Extract one archive.
    pub fn process(&self, path: &Path) -> Result<ArchiveReport, ExtractError> {
        let name = archive_name(path);
        let data = fs::read(path).map_err(|source| ExtractError::ReadArchive {
            path: path.to_path_buf(),
            source,
        })?;

        let archive = LbxArchive::parse(name.as_str(), &data).map_err(|source| {
            ExtractError::Parse {
                archive: name.clone(),
                source,
            }
        })?;
        let plan = archive.plan().map_err(|source| ExtractError::Parse {
            archive: name.clone(),
            source,
        })?;

        if !self.dry_run {
            let dir = self.output_root.join(&name);
            fs::create_dir_all(&dir).map_err(|source| ExtractError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            archive
                .persist(&plan, &mut FsWriter::new(dir))
                .map_err(|source| ExtractError::Write {
                    archive: name.clone(),
                    source,
                })?;
        }

        Ok(ArchiveReport {
            archive: name,
            archive_type: archive.archive_type().to_string(),
            entries: archive.entry_count(),
            written: !self.dry_run,
            files: plan.iter().map(FileReport::from).collect(),
        })
    }
}
