use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::snapshot::Snapshot;
use crate::errors::RepoError;

#[derive(Debug, Clone)]
pub struct CommitOptions {
    /// Whether a commit with an empty index is allowed. The permissive
    /// default is what lets a bare `commit` reproduce its parent's chain
    /// position with an empty snapshot.
    pub allow_empty: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        CommitOptions { allow_empty: true }
    }
}

impl Repository {
    /// Capture the staged paths into a new commit and advance the current
    /// branch to it.
    ///
    /// The snapshot records each staged path with its content as of now.
    /// Objects are stored before the branch moves, and the index is only
    /// cleared after the ref update, so a failure partway never strands
    /// state the refs point at.
    pub fn commit(&mut self, message: &str, opts: &CommitOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = match self.refs().read_head()? {
            Head::Attached(name) => name,
            Head::Detached(_) => return Err(RepoError::DetachedHead.into()),
        };

        let mut index = self.index();
        index.rehydrate()?;

        if index.is_empty() && !opts.allow_empty {
            return Err(RepoError::NothingToCommit.into());
        }

        let parent = self.refs().resolve_head()?;

        let mut snapshot = Snapshot::new();
        for path in index.entries() {
            let data = self.workspace().read_file(path)?;
            let blob = Blob::new(data);
            let blob_id = blob.object_id()?;

            self.database().store(blob)?;
            snapshot.insert(path.clone(), blob_id);
        }

        let message = message.trim().to_string();
        let commit = Commit::new(parent, snapshot, message);
        let commit_id = commit.object_id()?;

        self.database().store(commit)?;
        self.refs().advance_branch(&branch_name, commit_id)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
