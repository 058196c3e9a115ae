use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use crate::errors::RepoError;
use anyhow::Context;

#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    /// Create `target` as a new branch at the current commit instead of
    /// resolving it.
    pub create: bool,
}

impl Repository {
    /// Move HEAD to `target` and reconcile the working directory with the
    /// snapshot it resolves to.
    ///
    /// Resolution order: with the create flag, `target` must be a fresh
    /// branch name; otherwise an existing branch wins, then a 40-hex commit
    /// id (detaching HEAD), and anything else is a missing branch.
    ///
    /// The migration is applied before any reference moves, so a failed
    /// sync leaves HEAD, the branch table, and the index untouched. Every
    /// successful checkout ends with an empty index.
    pub fn checkout(&mut self, target: &str, opts: &CheckoutOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut index = self.index();
        index.rehydrate()?;

        let current_oid = self.refs().resolve_head()?;
        let current_snapshot = self.snapshot_at(current_oid.as_ref())?;

        if opts.create {
            let name = BranchName::try_parse(target.to_string())?;
            if self.refs().find_branch(name.as_ref())?.is_some() {
                return Err(RepoError::BranchExists(name.to_string()).into());
            }

            // same commit on both sides; the sync only discards staged
            // leftovers
            let migration = Migration::plan(
                self.database(),
                &current_snapshot,
                index.entries(),
                &current_snapshot,
            )?;
            self.workspace().apply_migration(&migration)?;

            self.refs().create_branch(name.clone(), current_oid)?;
            self.refs().set_head(&Head::Attached(name))?;
        } else if let Some(branch) = self.refs().find_branch(target)? {
            let target_snapshot = self.snapshot_at(branch.target.as_ref())?;

            let migration = Migration::plan(
                self.database(),
                &current_snapshot,
                index.entries(),
                &target_snapshot,
            )?;
            self.workspace().apply_migration(&migration)?;

            self.refs().set_head(&Head::Attached(branch.name))?;
        } else if let Ok(oid) = ObjectId::try_parse(target.to_string()) {
            if !self.database().contains(&oid) {
                return Err(RepoError::NoSuchCommit(oid.to_string()).into());
            }
            let commit = self
                .database()
                .parse_object_as_commit(&oid)?
                .ok_or_else(|| RepoError::NoSuchCommit(oid.to_string()))?;

            let migration = Migration::plan(
                self.database(),
                &current_snapshot,
                index.entries(),
                commit.snapshot(),
            )?;
            self.workspace().apply_migration(&migration)?;

            self.refs().set_head(&Head::Detached(oid))?;
        } else {
            return Err(RepoError::NoSuchBranch(target.to_string()).into());
        }

        index.clear();
        index.write_updates()?;

        Ok(())
    }

    /// The snapshot of the given commit, or the empty snapshot for the
    /// unborn state.
    fn snapshot_at(&self, oid: Option<&ObjectId>) -> anyhow::Result<Snapshot> {
        match oid {
            Some(oid) => Ok(self
                .database()
                .parse_object_as_commit(oid)?
                .with_context(|| format!("object {} is not a commit", oid))?
                .snapshot()
                .clone()),
            None => Ok(Snapshot::new()),
        }
    }
}
