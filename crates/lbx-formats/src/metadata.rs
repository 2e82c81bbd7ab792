//! Entry name and description table
//!
//! Archives that have one store a fixed-stride table at byte 512: for
//! entry `i`, an 8-byte name at `512 + 32i` and a 22-byte description at
//! `521 + 32i`, both null-padded. Names and descriptions may be missing
//! or partially filled.
//!
//! Master of Orion 2 archives put their first entry at 0x800 and carry
//! garbage in this range, so their metadata is treated as absent.
//!
//! Fields are decoded as lossy UTF-8: bytes that are not valid UTF-8
//! become U+FFFD in the output file name instead of being copied raw.

use crate::header::OffsetTable;
use crate::signature::{ALTERNATE_EDITION_SIGNATURE, matches_at};
use tracing::debug;

/// Start of the name/description table
pub const TABLE_OFFSET: usize = 512;

/// Distance between consecutive table rows
pub const ROW_STRIDE: usize = 32;

/// Name field width
pub const NAME_LEN: usize = 8;

/// Offset of the description within a row (name + terminator)
pub const DESCRIPTION_OFFSET: usize = NAME_LEN + 1;

/// Description field width
pub const DESCRIPTION_LEN: usize = 22;

/// Whether an entry's table row can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataAvailability {
    /// The row holds a name and description
    Valid,
    /// The archive belongs to the edition whose table is garbage
    AlternateEdition,
    /// The row would start inside the resource area
    OverlapsResources,
}

impl MetadataAvailability {
    /// Decide availability of entry `index`.
    ///
    /// Rows are consumed in order until one would start exactly at the
    /// first entry's offset; from that row on the table is exhausted.
    pub fn of(data: &[u8], first_offset: Option<u32>, index: usize) -> Self {
        if matches_at(data, 8, &ALTERNATE_EDITION_SIGNATURE) {
            return Self::AlternateEdition;
        }

        let exhausted_from = first_offset
            .map(|off| off as usize)
            .and_then(|off| off.checked_sub(TABLE_OFFSET))
            .filter(|delta| delta % ROW_STRIDE == 0)
            .map(|delta| delta / ROW_STRIDE);

        match exhausted_from {
            Some(row) if index >= row => Self::OverlapsResources,
            _ => Self::Valid,
        }
    }
}

/// Name and description of one entry, null bytes removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryMetadata {
    /// Short name, at most 8 bytes
    pub name: String,
    /// Longer description, at most 22 bytes
    pub description: String,
}

impl EntryMetadata {
    /// Read row `index` of the table.
    ///
    /// A field whose window runs past the buffer comes back empty.
    pub fn read(data: &[u8], index: usize) -> Self {
        let row = TABLE_OFFSET + ROW_STRIDE * index;
        Self {
            name: read_field(data, row, NAME_LEN),
            description: read_field(data, row + DESCRIPTION_OFFSET, DESCRIPTION_LEN),
        }
    }

    /// Description with path separators replaced, safe as a file name segment
    pub fn sanitized_description(&self) -> String {
        self.description.replace(['/', '\\'], "_")
    }
}

fn read_field(data: &[u8], start: usize, len: usize) -> String {
    let Some(raw) = data.get(start..start + len) else {
        return String::new();
    };
    let bytes: Vec<u8> = raw.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Metadata for every entry, index-aligned with the offset table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataTable {
    entries: Vec<EntryMetadata>,
}

impl MetadataTable {
    /// Read the table for all entries of `offsets`
    pub fn read(data: &[u8], offsets: &OffsetTable) -> Self {
        let first_offset = offsets.first();
        let entries = (0..offsets.len())
            .map(|index| match MetadataAvailability::of(data, first_offset, index) {
                MetadataAvailability::Valid => EntryMetadata::read(data, index),
                skipped => {
                    debug!("entry {index}: no metadata ({skipped:?})");
                    EntryMetadata::default()
                }
            })
            .collect();
        Self { entries }
    }

    /// Metadata of entry `index`
    pub fn get(&self, index: usize) -> Option<&EntryMetadata> {
        self.entries.get(index)
    }

    /// Entry names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entry descriptions in table order
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.description.as_str())
    }
}
