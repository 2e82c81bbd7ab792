//! Destination for extracted resources

use std::io;

/// Receives each extracted resource by name.
///
/// The parser never touches the filesystem; callers choose where the
/// bytes end up.
pub trait ResourceWriter {
    /// Store `bytes` under `name`
    fn persist(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

impl<W: ResourceWriter + ?Sized> ResourceWriter for &mut W {
    fn persist(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        (**self).persist(name, bytes)
    }
}

/// Keeps resources in memory, in the order they were written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryWriter {
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored resources
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bytes stored under `name`
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    /// Names in write order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(name, _)| name.as_str())
    }

    /// Consume the writer, returning `(name, bytes)` pairs in write order
    pub fn into_inner(self) -> Vec<(String, Vec<u8>)> {
        self.files
    }
}

impl ResourceWriter for MemoryWriter {
    fn persist(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        self.files.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_writer_keeps_order() {
        let mut writer = MemoryWriter::new();
        writer.persist("2_B_", b"b").unwrap();
        writer.persist("10_J_", b"j").unwrap();
        writer.persist("1_A_", b"a").unwrap();

        assert_eq!(writer.len(), 3);
        assert_eq!(writer.get("10_J_"), Some(&b"j"[..]));
        assert_eq!(writer.get("missing"), None);
        assert_eq!(
            writer.names().collect::<Vec<_>>(),
            vec!["2_B_", "10_J_", "1_A_"]
        );
    }

    #[test]
    fn test_writer_through_mutable_reference() {
        fn write_one(mut writer: impl ResourceWriter) {
            writer.persist("x", &[1]).unwrap();
        }

        let mut writer = MemoryWriter::new();
        write_one(&mut writer);
        assert_eq!(writer.into_inner(), vec![("x".to_string(), vec![1])]);
    }
}
