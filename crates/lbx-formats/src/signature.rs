//! Magic signatures and archive type classification
//!
//! An LBX archive carries no explicit content type. The type is inferred
//! once per archive by matching 4-byte windows at the start of the file
//! and around the first entry against the signatures below, in the order
//! given by [`CLASSIFICATION_RULES`].

use std::fmt;
use tracing::debug;

/// Smacker video ("SMK2"); the whole file is the payload
pub const STREAM_SIGNATURE: [u8; 4] = *b"SMK2";

/// Creative Voice File ("Crea"tive Voice File)
pub const SOUND_SAMPLE_SIGNATURE: [u8; 4] = *b"Crea";

/// Extended MIDI IFF container ("FORM")
pub const MUSIC_SEQUENCE_SIGNATURE: [u8; 4] = *b"FORM";

/// Sound driver blob, "-\0Co"
pub const DRIVER_SIGNATURE: [u8; 4] = [0x2D, 0x00, 0x43, 0x6F];

/// RIFF WAVE ("RIFF")
pub const RAW_SOUND_SIGNATURE: [u8; 4] = *b"RIFF";

/// Nested LBX container marker at bytes [2, 6)
pub const SUB_ARCHIVE_SIGNATURE: [u8; 4] = [0xAD, 0xFE, 0x00, 0x00];

/// First offset of 0x800 at bytes [8, 12): the edition whose name table is garbage
pub const ALTERNATE_EDITION_SIGNATURE: [u8; 4] = [0x00, 0x08, 0x00, 0x00];

/// Entry-local framing in front of sound samples and music sequences
pub const ENTRY_HEADER_SIZE: usize = 16;

/// Payload family of an archive, decided once from its signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveType {
    /// The whole file is a single video stream
    Stream,
    /// Creative Voice sound samples behind a 16-byte entry header
    SoundSample,
    /// XMIDI music behind a 16-byte entry header
    MusicSequence,
    /// Opaque sound drivers followed by two XMIDI entries
    MixedDriverAndSequence,
    /// RIFF WAVE files stored verbatim
    RawSound,
    /// Nested LBX archives stored verbatim
    SubArchive,
    /// Nothing recognised; entries are not extracted
    Unknown,
}

impl ArchiveType {
    /// Output file extension, including the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Stream => ".SMK",
            Self::SoundSample => ".VOC",
            Self::MusicSequence | Self::MixedDriverAndSequence => ".XMI",
            Self::RawSound => ".WAV",
            Self::SubArchive | Self::Unknown => "",
        }
    }

    /// Bytes of container framing to drop from the front of each entry
    pub const fn header_skip(self) -> usize {
        match self {
            Self::SoundSample | Self::MusicSequence | Self::MixedDriverAndSequence => {
                ENTRY_HEADER_SIZE
            }
            Self::Stream | Self::RawSound | Self::SubArchive | Self::Unknown => 0,
        }
    }

    /// Short stable name used in logs and reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::SoundSample => "sound-sample",
            Self::MusicSequence => "music-sequence",
            Self::MixedDriverAndSequence => "driver+music",
            Self::RawSound => "raw-sound",
            Self::SubArchive => "sub-archive",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a signature window starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Absolute position in the buffer
    Absolute(usize),
    /// Relative to the first entry's offset
    FirstEntry(usize),
}

impl Anchor {
    /// Resolve to an absolute position, if the anchor can be resolved
    fn resolve(self, first_offset: Option<u32>) -> Option<usize> {
        match self {
            Self::Absolute(pos) => Some(pos),
            Self::FirstEntry(delta) => first_offset.and_then(|off| (off as usize).checked_add(delta)),
        }
    }
}

/// One classification rule: a signature expected at an anchored window
#[derive(Debug, Clone, Copy)]
pub struct SignatureRule {
    /// Window position
    pub anchor: Anchor,
    /// Expected bytes
    pub signature: [u8; 4],
    /// Type assigned when the window matches
    pub archive_type: ArchiveType,
}

/// Classification rules in precedence order; the first match wins
pub const CLASSIFICATION_RULES: [SignatureRule; 6] = [
    SignatureRule {
        anchor: Anchor::Absolute(0),
        signature: STREAM_SIGNATURE,
        archive_type: ArchiveType::Stream,
    },
    SignatureRule {
        anchor: Anchor::FirstEntry(ENTRY_HEADER_SIZE),
        signature: SOUND_SAMPLE_SIGNATURE,
        archive_type: ArchiveType::SoundSample,
    },
    SignatureRule {
        anchor: Anchor::FirstEntry(ENTRY_HEADER_SIZE),
        signature: MUSIC_SEQUENCE_SIGNATURE,
        archive_type: ArchiveType::MusicSequence,
    },
    SignatureRule {
        anchor: Anchor::FirstEntry(0),
        signature: DRIVER_SIGNATURE,
        archive_type: ArchiveType::MixedDriverAndSequence,
    },
    SignatureRule {
        anchor: Anchor::FirstEntry(0),
        signature: RAW_SOUND_SIGNATURE,
        archive_type: ArchiveType::RawSound,
    },
    SignatureRule {
        anchor: Anchor::Absolute(2),
        signature: SUB_ARCHIVE_SIGNATURE,
        archive_type: ArchiveType::SubArchive,
    },
];

/// Whether `data[pos..pos + 4]` equals `signature`. Windows past the end never match.
pub fn matches_at(data: &[u8], pos: usize, signature: &[u8; 4]) -> bool {
    pos.checked_add(signature.len())
        .and_then(|end| data.get(pos..end))
        .is_some_and(|window| window == signature)
}

/// Whether the buffer starts with a video stream signature
pub fn is_stream(data: &[u8]) -> bool {
    matches_at(data, 0, &STREAM_SIGNATURE)
}

/// Classify an archive from its bytes and the offset of its first entry.
///
/// `first_offset` is `None` for archives without entries; rules anchored
/// on the first entry are then skipped.
pub fn classify(data: &[u8], first_offset: Option<u32>) -> ArchiveType {
    let archive_type = CLASSIFICATION_RULES
        .iter()
        .find(|rule| {
            rule.anchor
                .resolve(first_offset)
                .is_some_and(|pos| matches_at(data, pos, &rule.signature))
        })
        .map_or(ArchiveType::Unknown, |rule| rule.archive_type);

    debug!("classified archive as {archive_type} (first entry at {first_offset:?})");
    archive_type
}
