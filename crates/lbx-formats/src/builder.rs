//! LBX archive builder
//!
//! Lays out a header, offset table, optional name/description table at
//! byte 512 and the entry payloads back to back. Output parses with
//! [`crate::LbxArchive::parse`].

use crate::error::{LbxError, Result};
use crate::header::{HEADER_SIZE, LbxHeader, OFFSET_SIZE};
use crate::metadata::{DESCRIPTION_LEN, DESCRIPTION_OFFSET, NAME_LEN, ROW_STRIDE, TABLE_OFFSET};
use crate::signature::SUB_ARCHIVE_SIGNATURE;
use binrw::{BinWrite, io::Cursor};

#[derive(Debug, Clone)]
struct PendingEntry {
    name: String,
    description: String,
    payload: Vec<u8>,
}

/// Builder for LBX archives
#[derive(Debug, Clone)]
pub struct LbxBuilder {
    signature: [u8; 4],
    version: u16,
    with_table: bool,
    data_start: Option<usize>,
    entries: Vec<PendingEntry>,
}

impl Default for LbxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LbxBuilder {
    /// Create a builder with the standard LBX container signature
    pub fn new() -> Self {
        Self {
            signature: SUB_ARCHIVE_SIGNATURE,
            version: 0,
            with_table: false,
            data_start: None,
            entries: Vec::new(),
        }
    }

    /// Override the signature stored at bytes [2, 6)
    pub fn signature(mut self, signature: [u8; 4]) -> Self {
        self.signature = signature;
        self
    }

    /// Set the header version field
    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    /// Always write the name/description table, even if every row is empty
    pub fn with_table(mut self) -> Self {
        self.with_table = true;
        self
    }

    /// Place the first entry at a fixed offset instead of right after the tables
    pub fn data_start(mut self, offset: usize) -> Self {
        self.data_start = Some(offset);
        self
    }

    /// Add an entry without name or description
    pub fn add_entry(self, payload: Vec<u8>) -> Self {
        self.add_named_entry("", "", payload)
    }

    /// Add an entry with a table row. Fields longer than 8/22 bytes are cut.
    pub fn add_named_entry(mut self, name: &str, description: &str, payload: Vec<u8>) -> Self {
        if !name.is_empty() || !description.is_empty() {
            self.with_table = true;
        }
        self.entries.push(PendingEntry {
            name: name.to_string(),
            description: description.to_string(),
            payload,
        });
        self
    }

    /// Build the archive bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        let entry_count = u16::try_from(self.entries.len())
            .map_err(|_| LbxError::Build(format!("too many entries: {}", self.entries.len())))?;
        let header = LbxHeader {
            entry_count,
            signature: self.signature,
            version: self.version,
        };
        let table_end = header.table_end();

        let min_start = if self.with_table {
            if table_end > TABLE_OFFSET {
                return Err(LbxError::Build(format!(
                    "offset table for {entry_count} entries overlaps the name table"
                )));
            }
            TABLE_OFFSET + ROW_STRIDE * self.entries.len()
        } else {
            table_end
        };
        let start = self.data_start.unwrap_or(min_start);
        if start < min_start {
            return Err(LbxError::Build(format!(
                "data start {start:#x} is inside the header area ending at {min_start:#x}"
            )));
        }

        let mut cursor = Cursor::new(Vec::with_capacity(start));
        header.write(&mut cursor)?;
        let mut data = cursor.into_inner();

        let mut offset = start;
        for entry in &self.entries {
            let value = u32::try_from(offset)
                .map_err(|_| LbxError::Build(format!("entry offset {offset:#x} exceeds u32")))?;
            data.extend_from_slice(&value.to_le_bytes());
            offset += entry.payload.len();
        }
        debug_assert_eq!(data.len(), HEADER_SIZE + OFFSET_SIZE * self.entries.len());

        data.resize(start, 0);
        if self.with_table {
            for (index, entry) in self.entries.iter().enumerate() {
                let row = TABLE_OFFSET + ROW_STRIDE * index;
                copy_field(&mut data, row, NAME_LEN, &entry.name);
                copy_field(&mut data, row + DESCRIPTION_OFFSET, DESCRIPTION_LEN, &entry.description);
            }
        }

        for entry in &self.entries {
            data.extend_from_slice(&entry.payload);
        }
        Ok(data)
    }
}

fn copy_field(data: &mut [u8], start: usize, width: usize, value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(width);
    data[start..start + len].copy_from_slice(&bytes[..len]);
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::header::OffsetTable;

    #[test]
    fn test_layout_without_table() {
        let data = LbxBuilder::new()
            .add_entry(vec![0xAA; 3])
            .add_entry(vec![0xBB; 2])
            .build()
            .unwrap();

        assert_eq!(&data[..2], &[2, 0]);
        assert_eq!(&data[2..6], &SUB_ARCHIVE_SIGNATURE);
        let offsets = OffsetTable::parse(&data).unwrap();
        assert_eq!(offsets.as_slice(), &[16, 19]);
        assert_eq!(&data[16..], &[0xAA, 0xAA, 0xAA, 0xBB, 0xBB]);
    }

    #[test]
    fn test_header_fields() {
        let data = LbxBuilder::new()
            .version(7)
            .add_entry(vec![1])
            .build()
            .unwrap();

        let header = LbxHeader::parse(&data).unwrap();
        assert_eq!(header.entry_count, 1);
        assert_eq!(header.signature, SUB_ARCHIVE_SIGNATURE);
        assert_eq!(header.version, 7);
    }

    #[test]
    fn test_layout_with_table() {
        let data = LbxBuilder::new()
            .add_named_entry("LONGNAME123", "d", vec![1])
            .build()
            .unwrap();

        let offsets = OffsetTable::parse(&data).unwrap();
        assert_eq!(offsets.as_slice(), &[544]);
        assert_eq!(&data[512..520], b"LONGNAME");
        assert_eq!(data[520], 0);
        assert_eq!(data[521], b'd');
    }

    #[test]
    fn test_data_start_inside_tables_is_rejected() {
        let result = LbxBuilder::new()
            .with_table()
            .data_start(100)
            .add_entry(vec![1])
            .build();
        assert!(matches!(result, Err(LbxError::Build(_))));
    }

    #[test]
    fn test_too_many_entries_for_table() {
        let mut builder = LbxBuilder::new().with_table();
        for _ in 0..200 {
            builder = builder.add_entry(vec![0]);
        }
        assert!(matches!(builder.build(), Err(LbxError::Build(_))));
    }
}
