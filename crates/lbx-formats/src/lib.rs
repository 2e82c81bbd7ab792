//! Parser for LBX resource archives
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::doc_markdown)] // Format names don't need backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! LBX is the container format of the Simtex/MicroProse strategy games
//! (Master of Magic, Master of Orion, Master of Orion 2). An archive holds
//! a fixed number of entries located by an offset table; their content
//! type is not stored anywhere and has to be inferred from signatures.
//!
//! # Layout
//!
//! ```text
//! LBX:
//! ├── Header (8 bytes, little-endian)
//! │   ├── entry_count (u16)
//! │   ├── signature ([u8; 4], AD FE 00 00)
//! │   └── version (u16)
//! ├── Offsets (entry_count × u32)
//! ├── [Name table at 512: 32-byte rows of name(8) + NUL + description(22) + NUL]
//! └── Entry data
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use lbx_formats::{LbxArchive, MemoryWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("MUSIC.LBX")?;
//! let archive = LbxArchive::parse("MUSIC", &data)?;
//! println!("{} entries of type {}", archive.entry_count(), archive.archive_type());
//!
//! let mut writer = MemoryWriter::new();
//! let written = archive.extract_to(&mut writer)?;
//! for name in writer.names() {
//!     println!("{name}");
//! }
//! # let _ = written;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod builder;
pub mod decode;
pub mod error;
pub mod header;
pub mod metadata;
pub mod signature;
pub mod slicer;
pub mod writer;

pub use archive::LbxArchive;
pub use builder::LbxBuilder;
pub use decode::decode_le;
pub use error::{LbxError, Result};
pub use header::{LbxHeader, OffsetTable};
pub use metadata::{EntryMetadata, MetadataAvailability, MetadataTable};
pub use signature::{ArchiveType, classify};
pub use slicer::{ExtractedResource, ResourceSlicer, output_name};
pub use writer::{MemoryWriter, ResourceWriter};
