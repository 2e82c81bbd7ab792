//! Error types for LBX archive parsing

use thiserror::Error;

/// Errors that can occur when parsing an LBX archive or slicing its entries
#[derive(Error, Debug)]
pub enum LbxError {
    /// Buffer ends before the offset table does
    #[error("truncated archive: offset table needs {required} bytes, got {actual}")]
    Truncated {
        /// Bytes needed for the header and the full offset table
        required: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// An entry offset points at or past the end of the buffer
    #[error("entry {index} offset {offset:#x} is outside the archive ({len} bytes)")]
    OffsetOutOfBounds {
        /// Entry index in the offset table
        index: usize,
        /// Offending offset
        offset: u32,
        /// Buffer length
        len: usize,
    },

    /// Offsets must not decrease
    #[error("entry {index} offset {offset:#x} precedes previous offset {previous:#x}")]
    OffsetsNotSorted {
        /// Entry index in the offset table
        index: usize,
        /// Offending offset
        offset: u32,
        /// Offset of the preceding entry
        previous: u32,
    },

    /// A read window does not fit inside the buffer
    #[error("read of {width} bytes at offset {offset:#x} exceeds buffer of {len} bytes")]
    OutOfBounds {
        /// Start of the window
        offset: usize,
        /// Window width
        width: usize,
        /// Buffer length
        len: usize,
    },

    /// Computed extraction range is inverted or runs past the buffer
    #[error("entry {index}: invalid range {start:#x}..{end:#x} in buffer of {len} bytes")]
    InvalidRange {
        /// Entry index
        index: usize,
        /// Range start after header skip
        start: usize,
        /// Range end
        end: usize,
        /// Buffer length
        len: usize,
    },

    /// Builder input cannot be laid out as an LBX archive
    #[error("cannot build archive: {0}")]
    Build(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRw` parsing/writing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for LBX operation results
pub type Result<T> = std::result::Result<T, LbxError>;
