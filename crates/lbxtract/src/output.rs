//! Console reporting
//!
//! Success lines go to stdout, diagnostics to stderr. Colors are only
//! applied to diagnostics so the report lines stay machine-readable.

use lbx_formats::ExtractedResource;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Report format
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One summary line per archive
    #[default]
    Text,
    /// One JSON object per archive
    Json,
}

/// Style configuration for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    /// Whether to use colors in output
    pub use_color: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            // Check if NO_COLOR env var is set
            use_color: std::env::var("NO_COLOR").is_err(),
        }
    }
}

impl OutputStyle {
    /// Create a new output style
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors in output
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

/// Format a warning message
pub fn format_warning(text: &str, style: OutputStyle) -> String {
    if style.use_color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Format an error message
pub fn format_error(text: &str, style: OutputStyle) -> String {
    if style.use_color {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// `Extracted {count} file(s) from {NAME}.LBX`
pub fn summary_line(archive: &str, count: usize) -> String {
    format!("Extracted {count} file(s) from {archive}.LBX")
}

/// One planned or written resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Output file name
    pub name: String,
    /// Size in bytes
    pub size: usize,
    /// Format the resource was extracted as
    pub kind: String,
}

impl From<&ExtractedResource> for FileReport {
    fn from(resource: &ExtractedResource) -> Self {
        Self {
            name: resource.file_name.clone(),
            size: resource.len(),
            kind: resource.kind.to_string(),
        }
    }
}

/// Outcome of one archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveReport {
    /// Archive name without extension, upper-cased
    pub archive: String,
    /// Detected payload family
    pub archive_type: String,
    /// Declared entry count
    pub entries: usize,
    /// Whether files were actually written
    pub written: bool,
    /// Resources extracted (or planned, on a dry run)
    pub files: Vec<FileReport>,
}

impl ArchiveReport {
    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => {
                if self.written {
                    summary_line(&self.archive, self.files.len())
                } else {
                    let mut lines: Vec<String> = self
                        .files
                        .iter()
                        .map(|f| format!("  {} ({} bytes)", f.name, f.size))
                        .collect();
                    lines.push(format!(
                        "Would extract {} file(s) from {}.LBX",
                        self.files.len(),
                        self.archive
                    ));
                    lines.join("\n")
                }
            }
            OutputFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
            }
        }
    }
}
