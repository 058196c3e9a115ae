//! Index (staging area)
//!
//! The index tracks which paths should be captured by the next commit. No
//! content is staged; contents are read from the workspace at commit time.
//!
//! The on-disk format (see `artifacts::index`) carries a header, the
//! NUL-padded path entries, and a trailing SHA-1 checksum that is verified
//! on every load.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_MIN_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Staging area: the ordered set of paths captured by the next commit.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.bantam/index`)
    path: Box<Path>,
    /// Staged paths, sorted
    entries: BTreeSet<PathBuf>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk.
    ///
    /// Parses the header and entries and verifies the trailing checksum.
    /// A missing or empty file leaves the index empty.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.path().exists() {
            self.clear();
            std::fs::File::create(self.path())?;
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        self.clear();

        // nothing staged yet
        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = Self::parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid index file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported index file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Parse all entries from the index file.
    ///
    /// Entries are variable-length with 8-byte alignment: blocks are read
    /// until one ends in the NUL terminator.
    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let mut entry_bytes = reader.read(ENTRY_MIN_SIZE)?;

            while entry_bytes[entry_bytes.len() - 1] != 0 {
                entry_bytes.extend_from_slice(&reader.read(ENTRY_MIN_SIZE)?);
            }

            let entry = IndexEntry::deserialize(Cursor::new(entry_bytes))?;
            self.entries.insert(entry.path);
        }

        Ok(())
    }

    /// Stage a path. Returns false when the path was already staged.
    pub fn add(&mut self, path: PathBuf) -> bool {
        let inserted = self.entries.insert(path);
        self.changed |= inserted;
        inserted
    }

    /// Unstage a path. Returns false when the path was not staged.
    pub fn remove(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(path);
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter()
    }

    /// Persist the index.
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file for the duration of the
    /// rewrite.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        let header = IndexHeader::new(
            String::from(SIGNATURE),
            VERSION,
            self.entries.len() as u32,
        );
        writer.write(&header.serialize()?)?;

        for path in &self.entries {
            let entry_bytes = IndexEntry::new(path.clone()).serialize()?;
            writer.write(&entry_bytes)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }
}
