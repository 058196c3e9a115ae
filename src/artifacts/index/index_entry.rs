use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;
use std::path::PathBuf;

/// Smallest on-disk size of an entry; entries grow in [`ENTRY_BLOCK`] steps.
pub const ENTRY_MIN_SIZE: usize = 8;

/// Alignment block for entry padding
pub const ENTRY_BLOCK: usize = 8;

/// A single staged path.
///
/// Serialized as the path bytes followed by 1 to 8 NUL bytes, padding the
/// entry to an 8-byte boundary. The guaranteed trailing NUL is what lets the
/// reader detect the end of a variable-length entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct IndexEntry {
    pub(crate) path: PathBuf,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = self.path.to_string_lossy().as_bytes().to_vec();

        bytes.push(0);
        while bytes.len() % ENTRY_BLOCK != 0 {
            bytes.push(0);
        }

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_until(0, &mut bytes)?;

        if bytes.pop() != Some(0) {
            return Err(anyhow!("Index entry is missing its NUL terminator"));
        }

        let path = String::from_utf8(bytes)?;
        Ok(IndexEntry::new(PathBuf::from(path)))
    }
}
