use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Planned working-directory delta between two snapshots.
///
/// Removals cover every path known to the current state (the checked-out
/// snapshot plus anything staged) that the target snapshot does not track.
/// Writes cover the target snapshot in full, so a checkout always restores
/// tracked content even when a file was modified in place. Untracked,
/// unstaged files are never part of the plan.
#[derive(Debug)]
pub struct Migration {
    /// Paths to delete, sorted
    removals: Vec<PathBuf>,
    /// Path and content pairs to (re)write, sorted by path
    writes: Vec<(PathBuf, String)>,
}

impl Migration {
    /// Plan the delta from `current` (plus `staged` leftovers) to `target`.
    ///
    /// Blob contents are loaded up front: once planning succeeds, applying
    /// the migration performs no further object reads.
    pub fn plan<'p>(
        database: &Database,
        current: &Snapshot,
        staged: impl Iterator<Item = &'p PathBuf>,
        target: &Snapshot,
    ) -> anyhow::Result<Self> {
        let mut removals = current
            .paths()
            .filter(|path| !target.contains(path))
            .cloned()
            .collect::<BTreeSet<_>>();
        removals.extend(staged.filter(|path| !target.contains(path)).cloned());

        let writes = target
            .entries()
            .map(|(path, oid)| Ok((path.clone(), Self::load_blob_data(database, oid)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Migration {
            removals: removals.into_iter().collect(),
            writes,
        })
    }

    pub fn removals(&self) -> impl Iterator<Item = &Path> {
        self.removals.iter().map(PathBuf::as_path)
    }

    pub fn writes(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.writes
            .iter()
            .map(|(path, data)| (path.as_path(), data.as_str()))
    }

    fn load_blob_data(database: &Database, object_id: &ObjectId) -> anyhow::Result<String> {
        let blob = database
            .parse_object_as_blob(object_id)?
            .with_context(|| format!("Failed to parse blob object {}", object_id))?;

        Ok(blob.content().to_string())
    }
}
