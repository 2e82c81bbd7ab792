//! Writes extracted resources into a directory

use lbx_formats::ResourceWriter;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Writes each resource as a file in one output directory
#[derive(Debug, Clone)]
pub struct FsWriter {
    dir: PathBuf,
}

impl FsWriter {
    /// Write into `dir`, which must already exist
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResourceWriter for FsWriter {
    fn persist(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        // Names come from archive metadata and must stay inside the output directory
        let mut components = Path::new(name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write outside the output directory: {name:?}"),
            ));
        }

        let path = self.dir.join(name);
        trace!("writing {} bytes to {}", bytes.len(), path.display());
        fs::write(path, bytes)
    }
}
