//! Locating LBX files in a directory

use crate::error::ExtractError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of LBX archives, matched case-insensitively
pub const LBX_EXTENSION: &str = "lbx";

/// List the LBX files directly inside `dir`, sorted by file name.
pub fn find_archives(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut archives = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ExtractError::Discover {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_lbx(entry.path()) {
            archives.push(entry.into_path());
        }
    }
    Ok(archives)
}

/// Whether `path` has an `.lbx` extension in any letter case
pub fn is_lbx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LBX_EXTENSION))
}

/// Archive name used for output: the file stem, upper-cased
pub fn archive_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}
