//! Per-entry extraction ranges and output names

use crate::error::{LbxError, Result};
use crate::header::OffsetTable;
use crate::metadata::{EntryMetadata, MetadataTable};
use crate::signature::{ArchiveType, RAW_SOUND_SIGNATURE, matches_at};
use std::ops::Range;
use tracing::debug;

/// One resource to write out: a byte range of the archive and its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResource {
    /// Zero-based entry index; `0` for whole-file streams
    pub index: usize,
    /// Output file name
    pub file_name: String,
    /// Byte range within the archive buffer
    pub range: Range<usize>,
    /// Format the range was extracted as
    pub kind: ArchiveType,
}

impl ExtractedResource {
    /// Borrow the resource bytes from the archive buffer it was planned on
    pub fn bytes<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.range.clone()]
    }

    /// Resource size in bytes
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the resource is empty
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Build `{index+1}_{name}_{description}{extension}`; empty segments stay in place
pub fn output_name(index: usize, metadata: &EntryMetadata, extension: &str) -> String {
    format!(
        "{}_{}_{}{}",
        index + 1,
        metadata.name,
        metadata.sanitized_description(),
        extension
    )
}

/// Computes extraction ranges for the entries of one archive
#[derive(Debug, Clone, Copy)]
pub struct ResourceSlicer<'a> {
    data: &'a [u8],
    offsets: &'a OffsetTable,
    metadata: &'a MetadataTable,
    archive_type: ArchiveType,
}

impl<'a> ResourceSlicer<'a> {
    /// Create a slicer over an archive buffer
    pub fn new(
        data: &'a [u8],
        offsets: &'a OffsetTable,
        metadata: &'a MetadataTable,
        archive_type: ArchiveType,
    ) -> Self {
        Self {
            data,
            offsets,
            metadata,
            archive_type,
        }
    }

    /// Format entry `index` is extracted as.
    ///
    /// A RIFF signature at the entry's own offset overrides the archive type.
    pub fn entry_kind(&self, index: usize) -> Option<ArchiveType> {
        let start = self.offsets.get(index)? as usize;
        if matches_at(self.data, start, &RAW_SOUND_SIGNATURE) {
            Some(ArchiveType::RawSound)
        } else {
            Some(self.archive_type)
        }
    }

    /// Plan extraction of entry `index`.
    ///
    /// Returns `Ok(None)` for entries that are not extracted: everything in
    /// an unknown archive, entries of a raw-sound archive without their own
    /// RIFF header, and driver blobs ahead of the two trailing music
    /// entries.
    pub fn slice(&self, index: usize) -> Result<Option<ExtractedResource>> {
        let (Some(offset), Some(kind)) = (self.offsets.get(index), self.entry_kind(index)) else {
            return Ok(None);
        };
        let count = self.offsets.len();

        match kind {
            ArchiveType::Unknown | ArchiveType::Stream => {
                debug!("entry {index}: not extracted from {kind} archive");
                return Ok(None);
            }
            ArchiveType::RawSound
                if !matches_at(self.data, offset as usize, &RAW_SOUND_SIGNATURE) =>
            {
                debug!("entry {index}: no RIFF header in raw-sound archive");
                return Ok(None);
            }
            ArchiveType::MixedDriverAndSequence if index + 2 < count => {
                debug!("entry {index}: skipping driver blob");
                return Ok(None);
            }
            _ => {}
        }

        let len = self.data.len();
        let start = offset as usize + kind.header_skip();
        let end = self.offsets.end_of(index, len);
        if start > end || end > len {
            return Err(LbxError::InvalidRange {
                index,
                start,
                end,
                len,
            });
        }

        let empty = EntryMetadata::default();
        let metadata = self.metadata.get(index).unwrap_or(&empty);
        let file_name = output_name(index, metadata, kind.extension());
        debug!("entry {index}: {file_name} [{start:#x}..{end:#x})");

        Ok(Some(ExtractedResource {
            index,
            file_name,
            range: start..end,
            kind,
        }))
    }
}
