//! Index file checksum trailer.
//!
//! The last [`CHECKSUM_SIZE`] bytes of a "BNTM" index file are the SHA-1 of
//! everything before them: header and entries alike. This wrapper owns the
//! locked file handle and folds every byte passing through it into a
//! running digest, so a load can verify the trailer and a store can emit it
//! without either side traversing the file twice.

use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Digesting reader/writer over the locked index file.
///
/// A single instance is used either to read an index or to write one,
/// never both; the digest covers exactly the bytes that went through it.
#[derive(Debug)]
pub struct Checksum<'f> {
    file: FileGuard<&'f mut std::fs::File>,
    digest: Sha1,
    /// Index bytes read or written so far, for error reporting
    consumed: usize,
}

impl<'f> Checksum<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
            consumed: 0,
        }
    }

    /// Read exactly `size` bytes of index content into the digest.
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Vec<u8>> {
        let mut buffer = vec![0; size];
        self.file.deref_mut().read_exact(&mut buffer).map_err(|_| {
            anyhow!(
                "Index file truncated: expected {} more bytes at offset {}",
                size,
                self.consumed
            )
        })?;

        self.digest.update(&buffer);
        self.consumed += size;
        Ok(buffer)
    }

    /// Write index content, folding it into the digest.
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        self.consumed += data.len();
        Ok(())
    }

    /// Append the SHA-1 trailer covering everything written so far.
    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.file
            .deref_mut()
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write index checksum trailer"))?;

        Ok(())
    }

    /// Read the SHA-1 trailer and compare it against everything read so far.
    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut stored = [0u8; CHECKSUM_SIZE];
        self.file
            .deref_mut()
            .read_exact(&mut stored)
            .map_err(|_| anyhow!("Index file is missing its checksum trailer"))?;

        let computed = self.digest.clone().finalize();
        if stored != computed.as_slice() {
            return Err(anyhow!(
                "Index checksum mismatch over {} bytes: the index file is corrupt",
                self.consumed
            ));
        }

        Ok(())
    }
}
