//! Parsed LBX archive and its extraction plan

use crate::error::{LbxError, Result};
use crate::header::OffsetTable;
use crate::metadata::MetadataTable;
use crate::signature::{ArchiveType, classify, is_stream};
use crate::slicer::{ExtractedResource, ResourceSlicer};
use crate::writer::ResourceWriter;
use tracing::{debug, info};

/// An LBX archive borrowed from a fully loaded buffer
#[derive(Debug, Clone)]
pub struct LbxArchive<'a> {
    name: String,
    data: &'a [u8],
    archive_type: ArchiveType,
    offsets: OffsetTable,
    metadata: MetadataTable,
}

impl<'a> LbxArchive<'a> {
    /// Parse an archive.
    ///
    /// `name` is the archive name without extension; it names the single
    /// output of stream archives. Streams are recognised before the offset
    /// table is read, since their first bytes are not an entry count.
    pub fn parse(name: impl Into<String>, data: &'a [u8]) -> Result<Self> {
        let name = name.into();

        if is_stream(data) {
            debug!("{name}: whole-file stream, {} bytes", data.len());
            return Ok(Self {
                name,
                data,
                archive_type: ArchiveType::Stream,
                offsets: OffsetTable::default(),
                metadata: MetadataTable::default(),
            });
        }

        let offsets = OffsetTable::parse(data)?;
        let archive_type = classify(data, offsets.first());
        let metadata = MetadataTable::read(data, &offsets);
        debug!(
            "{name}: {} entries, type {archive_type}",
            offsets.len()
        );

        Ok(Self {
            name,
            data,
            archive_type,
            offsets,
            metadata,
        })
    }

    /// Payload family decided at parse time
    pub fn archive_type(&self) -> ArchiveType {
        self.archive_type
    }

    /// Declared number of entries; zero for streams
    pub fn entry_count(&self) -> usize {
        self.offsets.len()
    }

    /// Entry offset table
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Entry names and descriptions
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// Plan every resource to extract, in entry order.
    ///
    /// Any invalid range fails the whole plan.
    pub fn plan(&self) -> Result<Vec<ExtractedResource>> {
        if self.archive_type == ArchiveType::Stream {
            return Ok(vec![ExtractedResource {
                index: 0,
                file_name: format!("{}{}", self.name, ArchiveType::Stream.extension()),
                range: 0..self.data.len(),
                kind: ArchiveType::Stream,
            }]);
        }

        let slicer = ResourceSlicer::new(
            self.data,
            &self.offsets,
            &self.metadata,
            self.archive_type,
        );
        let mut resources = Vec::with_capacity(self.offsets.len());
        for index in 0..self.offsets.len() {
            if let Some(resource) = slicer.slice(index)? {
                resources.push(resource);
            }
        }
        Ok(resources)
    }

    /// Plan and hand every resource to `writer`. Returns the number written.
    ///
    /// Nothing is written if planning fails.
    pub fn extract_to<W: ResourceWriter + ?Sized>(&self, writer: &mut W) -> Result<usize> {
        let resources = self.plan()?;
        self.persist(&resources, writer)?;
        Ok(resources.len())
    }

    /// Hand an already computed [`plan`](Self::plan) to `writer`, in order
    pub fn persist<W: ResourceWriter + ?Sized>(
        &self,
        resources: &[ExtractedResource],
        writer: &mut W,
    ) -> Result<()> {
        for resource in resources {
            writer
                .persist(&resource.file_name, resource.bytes(self.data))
                .map_err(LbxError::Io)?;
        }
        info!(
            "{}: extracted {} of {} entries",
            self.name,
            resources.len(),
            self.offsets.len()
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::builder::LbxBuilder;
    use crate::header::{HEADER_SIZE, OFFSET_SIZE};
    use crate::signature::{DRIVER_SIGNATURE, MUSIC_SEQUENCE_SIGNATURE, SOUND_SAMPLE_SIGNATURE};
    use crate::writer::MemoryWriter;
    use pretty_assertions::assert_eq;
    use std::io;

    fn framed(signature: [u8; 4], body: &[u8]) -> Vec<u8> {
        let mut entry = vec![0; 16];
        entry.extend_from_slice(&signature);
        entry.extend_from_slice(body);
        entry
    }

    #[test]
    fn test_stream_is_one_whole_file() {
        let mut data = b"SMK2".to_vec();
        data.extend_from_slice(&[0x99; 40]);
        let archive = LbxArchive::parse("INTRO", &data).unwrap();
        assert_eq!(archive.archive_type(), ArchiveType::Stream);
        assert_eq!(archive.entry_count(), 0);

        let mut writer = MemoryWriter::new();
        assert_eq!(archive.extract_to(&mut writer).unwrap(), 1);
        assert_eq!(writer.names().collect::<Vec<_>>(), vec!["INTRO.SMK"]);
        assert_eq!(writer.get("INTRO.SMK"), Some(data.as_slice()));
    }

    #[test]
    fn test_sub_archive_reconstructs_entries() {
        let payloads: Vec<Vec<u8>> = (0u8..5).map(|i| vec![i; 3 + usize::from(i)]).collect();
        let mut builder = LbxBuilder::new();
        for payload in &payloads {
            builder = builder.add_entry(payload.clone());
        }
        let data = builder.build().unwrap();

        let archive = LbxArchive::parse("NESTED", &data).unwrap();
        assert_eq!(archive.archive_type(), ArchiveType::SubArchive);

        let mut writer = MemoryWriter::new();
        assert_eq!(archive.extract_to(&mut writer).unwrap(), 5);
        let files = writer.into_inner();
        let names: Vec<_> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["1__", "2__", "3__", "4__", "5__"]);

        // Header and offset table followed by every entry gives back the archive
        let mut rebuilt = data[..HEADER_SIZE + OFFSET_SIZE * payloads.len()].to_vec();
        for (_, bytes) in &files {
            rebuilt.extend_from_slice(bytes);
        }
        assert_eq!(rebuilt, data);
        for ((_, bytes), payload) in files.iter().zip(&payloads) {
            assert_eq!(bytes, payload);
        }
    }

    #[test]
    fn test_unknown_archive_writes_nothing() {
        let data = LbxBuilder::new()
            .signature([0; 4])
            .add_entry(vec![7; 32])
            .build()
            .unwrap();
        let archive = LbxArchive::parse("MYSTERY", &data).unwrap();
        assert_eq!(archive.archive_type(), ArchiveType::Unknown);

        let mut writer = MemoryWriter::new();
        assert_eq!(archive.extract_to(&mut writer).unwrap(), 0);
        assert!(writer.is_empty());
    }

    #[test]
    fn test_driver_archive_with_five_entries() {
        let mut driver = DRIVER_SIGNATURE.to_vec();
        driver.extend_from_slice(&[0; 28]);
        let data = LbxBuilder::new()
            .add_named_entry("DRV1", "adlib", driver.clone())
            .add_named_entry("DRV2", "sb", driver.clone())
            .add_named_entry("DRV3", "roland", driver)
            .add_named_entry("SEQ1", "title", framed(MUSIC_SEQUENCE_SIGNATURE, b"t"))
            .add_named_entry("SEQ2", "victory", framed(MUSIC_SEQUENCE_SIGNATURE, b"v"))
            .build()
            .unwrap();

        let archive = LbxArchive::parse("SNDDRV", &data).unwrap();
        assert_eq!(archive.archive_type(), ArchiveType::MixedDriverAndSequence);

        let plan = archive.plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].file_name, "4_SEQ1_title.XMI");
        assert_eq!(
            plan[0].range.start,
            archive.offsets().get(3).unwrap() as usize + 16
        );
        assert_eq!(plan[1].file_name, "5_SEQ2_victory.XMI");
        assert_eq!(plan[1].bytes(&data), b"FORMv");
    }

    #[test]
    fn test_alternate_edition_names_are_empty() {
        let data = LbxBuilder::new()
            .data_start(0x800)
            .add_named_entry("JUNK1", "garbage", framed(SOUND_SAMPLE_SIGNATURE, b"pcm"))
            .add_named_entry("JUNK2", "garbage", framed(SOUND_SAMPLE_SIGNATURE, b"pcm2"))
            .build()
            .unwrap();

        let archive = LbxArchive::parse("SOUND", &data).unwrap();
        assert!(archive.metadata().names().all(str::is_empty));
        let names: Vec<_> = archive
            .plan()
            .unwrap()
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        assert_eq!(names, vec!["1__.VOC", "2__.VOC"]);
    }

    #[test]
    fn test_truncated_archive_is_rejected() {
        let data = [9, 0, 0, 0, 0, 0, 0, 0, 1, 2];
        assert!(matches!(
            LbxArchive::parse("BROKEN", &data),
            Err(LbxError::Truncated { .. })
        ));
    }

    #[test]
    fn test_failed_plan_writes_nothing() {
        let data = LbxBuilder::new()
            .add_entry(framed(SOUND_SAMPLE_SIGNATURE, b"ok"))
            .add_entry(vec![0; 4])
            .build()
            .unwrap();
        let archive = LbxArchive::parse("BAD", &data).unwrap();

        let mut writer = MemoryWriter::new();
        assert!(archive.extract_to(&mut writer).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_persisting_a_plan_writes_only_riff_entries() {
        let data = LbxBuilder::new()
            .add_entry(b"RIFF\x04\0\0\0WAVE".to_vec())
            .add_entry(vec![0x42; 12])
            .build()
            .unwrap();
        let archive = LbxArchive::parse("SPEECH", &data).unwrap();
        assert_eq!(archive.archive_type(), ArchiveType::RawSound);

        let plan = archive.plan().unwrap();
        let mut writer = MemoryWriter::new();
        archive.persist(&plan, &mut writer).unwrap();
        assert_eq!(writer.names().collect::<Vec<_>>(), vec!["1__.WAV"]);
        assert_eq!(writer.get("1__.WAV"), Some(&b"RIFF\x04\0\0\0WAVE"[..]));
    }

    #[test]
    fn test_writer_errors_propagate() {
        struct Failing;
        impl ResourceWriter for Failing {
            fn persist(&mut self, _name: &str, _bytes: &[u8]) -> io::Result<()> {
                Err(io::Error::other("disk full"))
            }
        }

        let data = LbxBuilder::new().add_entry(vec![1, 2]).build().unwrap();
        let archive = LbxArchive::parse("X", &data).unwrap();
        assert!(matches!(
            archive.extract_to(&mut Failing),
            Err(LbxError::Io(_))
        ));
    }
}
