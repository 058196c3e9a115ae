use crate::areas::refs::{DEFAULT_BRANCH, Head};
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepoError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create a fresh repository: the hidden directory, the object store,
    /// an unborn default branch, HEAD attached to it, and an empty index.
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.repo_path().exists() {
            return Err(RepoError::RepositoryExists(self.path().to_path_buf()).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create objects directory")?;

        self.refs()
            .update_ref_file(self.refs().branches_path(), String::new())
            .context("Failed to create branch table")?;

        let default_branch = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().create_branch(default_branch.clone(), None)?;
        self.refs()
            .set_head(&Head::Attached(default_branch))
            .context("Failed to create initial HEAD reference")?;

        let mut index = self.index();
        index
            .write_updates()
            .context("Failed to create index file")?;

        Ok(())
    }
}
