//! Commit object
//!
//! A commit records one snapshot of the tracked file set together with the
//! id of its single parent (absent only for the root of a history). The
//! commit id is the SHA-1 of the serialized object, so it covers the parent
//! id, the message, and every snapshot entry.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! entry <blob-sha> <path>
//! ...
//!
//! <commit message>
//! ```
//!
//! The `parent` line is omitted for the root commit; `entry` lines are
//! sorted by path.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Parent commit id (None for the root commit)
    parent: Option<ObjectId>,
    /// Tracked file set at commit time
    snapshot: Snapshot,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(parent: Option<ObjectId>, snapshot: Snapshot, message: String) -> Self {
        Commit {
            parent,
            snapshot,
            message,
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (path, oid) in self.snapshot.entries() {
            object_content.push(format!("entry {} {}", oid.as_ref(), path.display()));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines().peekable();

        let mut parent = None;
        if let Some(line) = lines.peek()
            && let Some(parent_oid) = line.strip_prefix("parent ")
        {
            parent = Some(ObjectId::try_parse(parent_oid.to_string())?);
            lines.next();
        }

        let mut snapshot = Snapshot::new();
        while let Some(line) = lines.peek() {
            let Some(entry) = line.strip_prefix("entry ") else {
                break;
            };
            // the blob id never contains a space, the path may
            let (oid, path) = entry
                .split_once(' ')
                .context("Invalid commit object: malformed entry line")?;
            snapshot.insert(PathBuf::from(path), ObjectId::try_parse(oid.to_string())?);
            lines.next();
        }

        // skip the empty line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parent, snapshot, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use std::io::Cursor;

    fn blob_id(content: &str) -> ObjectId {
        Blob::new(content.to_string()).object_id().unwrap()
    }

    fn reparse(commit: &Commit) -> Commit {
        let bytes = commit.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader).unwrap();
        Commit::deserialize(reader).unwrap()
    }

    #[test]
    fn root_commit_survives_serialization() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(PathBuf::from("asdf.txt"), blob_id(""));
        let commit = Commit::new(None, snapshot, "GO BEARS!1".to_string());

        let parsed = reparse(&commit);
        assert_eq!(parsed, commit);
        assert!(parsed.parent().is_none());
        assert_eq!(parsed.message(), "GO BEARS!1");
    }

    #[test]
    fn child_commit_keeps_parent_link_and_paths_with_spaces() {
        let root = Commit::new(None, Snapshot::new(), "root".to_string());
        let root_id = root.object_id().unwrap();

        let mut snapshot = Snapshot::new();
        snapshot.insert(PathBuf::from("dir/file with spaces.txt"), blob_id("x"));
        let child = Commit::new(Some(root_id.clone()), snapshot, "child".to_string());

        let parsed = reparse(&child);
        assert_eq!(parsed.parent(), Some(&root_id));
        assert!(
            parsed
                .snapshot()
                .contains(std::path::Path::new("dir/file with spaces.txt"))
        );
    }

    #[test]
    fn id_is_derived_from_parent_message_and_snapshot() {
        let a = Commit::new(None, Snapshot::new(), "m".to_string());
        let b = Commit::new(None, Snapshot::new(), "m".to_string());
        let c = Commit::new(None, Snapshot::new(), "other".to_string());
        let d = Commit::new(
            Some(a.object_id().unwrap()),
            Snapshot::new(),
            "m".to_string(),
        );

        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
        assert_ne!(a.object_id().unwrap(), c.object_id().unwrap());
        assert_ne!(a.object_id().unwrap(), d.object_id().unwrap());
    }
}
