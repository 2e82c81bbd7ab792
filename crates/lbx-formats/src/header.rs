//! LBX header and offset table parsing
//!
//! Layout (little-endian):
//! ```text
//! offset 0x00: u16 entry_count
//! offset 0x02: [u8; 4] signature   (AD FE 00 00 for nested archives)
//! offset 0x06: u16 version
//! offset 0x08: [u32; entry_count]  (start of each entry in the file)
//! ```

use crate::decode::decode_le;
use crate::error::{LbxError, Result};
use binrw::{BinRead, BinWrite, io::Cursor};
use tracing::debug;

/// Size of the fixed header preceding the offset table
pub const HEADER_SIZE: usize = 8;

/// Width of one offset table slot
pub const OFFSET_SIZE: usize = 4;

/// Fixed 8-byte LBX header
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct LbxHeader {
    /// Number of entries in the offset table
    pub entry_count: u16,

    /// Container signature; only nested archives are required to carry one
    pub signature: [u8; 4],

    /// Format version, unused by the extractor
    pub version: u16,
}

impl LbxHeader {
    /// Parse the fixed header from the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(LbxError::Truncated {
                required: HEADER_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self::read(&mut Cursor::new(data))?)
    }

    /// Bytes needed to hold the header plus the full offset table
    pub fn table_end(&self) -> usize {
        HEADER_SIZE + OFFSET_SIZE * usize::from(self.entry_count)
    }
}

/// Ordered start offsets of every entry in an archive
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OffsetTable {
    offsets: Vec<u32>,
}

impl OffsetTable {
    /// Read and validate the offset table.
    ///
    /// Fails if the buffer cannot hold `8 + 4 * entry_count` bytes, if an
    /// offset is not strictly inside the buffer, or if offsets decrease.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = LbxHeader::parse(data)?;
        let required = header.table_end();
        if data.len() < required {
            return Err(LbxError::Truncated {
                required,
                actual: data.len(),
            });
        }

        let offsets: Vec<u32> = data[HEADER_SIZE..required]
            .chunks_exact(OFFSET_SIZE)
            .map(decode_le)
            .collect();

        for (index, &offset) in offsets.iter().enumerate() {
            if offset as usize >= data.len() {
                return Err(LbxError::OffsetOutOfBounds {
                    index,
                    offset,
                    len: data.len(),
                });
            }
            if let Some(&previous) = index.checked_sub(1).and_then(|p| offsets.get(p)) {
                if offset < previous {
                    return Err(LbxError::OffsetsNotSorted {
                        index,
                        offset,
                        previous,
                    });
                }
            }
        }

        debug!(
            "offset table: {} entries, first at {:?}",
            offsets.len(),
            offsets.first()
        );
        Ok(Self { offsets })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the archive declares no entries
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of the first entry, used as the classification anchor
    pub fn first(&self) -> Option<u32> {
        self.offsets.first().copied()
    }

    /// Start offset of entry `index`
    pub fn get(&self, index: usize) -> Option<u32> {
        self.offsets.get(index).copied()
    }

    /// End of entry `index`: the next entry's start, or `buffer_len` for the last one
    pub fn end_of(&self, index: usize, buffer_len: usize) -> usize {
        self.offsets
            .get(index + 1)
            .map_or(buffer_len, |&next| next as usize)
    }

    /// All offsets in table order
    pub fn as_slice(&self) -> &[u32] {
        &self.offsets
    }
}
