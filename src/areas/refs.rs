//! References (branch table, HEAD)
//!
//! Two files under the repository directory hold all reference state:
//!
//! - `branches`: one branch per line, `<name>` for an unborn branch or
//!   `<name> <commit-id>` once the branch has a commit. Lines are kept in
//!   creation order, which is also the order branch listings report.
//! - `HEAD`: `ref: <branch-name>` while attached to a branch, or a bare
//!   commit id while detached.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepoError;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Regex pattern for parsing the attached form of the HEAD file
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Where HEAD currently points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD follows a branch; committing advances that branch.
    Attached(BranchName),
    /// HEAD is pinned directly to a commit.
    Detached(ObjectId),
}

/// A named, movable pointer into the commit graph.
///
/// `target` is None only while the branch is unborn (no commits yet).
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Branch {
    pub name: BranchName,
    pub target: Option<ObjectId>,
}

/// Branch table and HEAD manager.
///
/// Writes go through an exclusive file lock and a full rewrite of the table
/// file, so a reference update is observed either completely or not at all.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.bantam`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.path.join("branches").into_boxed_path()
    }

    pub fn read_head(&self) -> anyhow::Result<Head> {
        let content = std::fs::read_to_string(self.head_path())
            .with_context(|| "Failed to read HEAD file")?;
        let content = content.trim();

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Head::Attached(BranchName::try_parse(
                symref_match[1].to_string(),
            )?))
        } else {
            Ok(Head::Detached(ObjectId::try_parse(content.to_string())?))
        }
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        let raw_ref = match head {
            Head::Attached(name) => format!("ref: {}", name),
            Head::Detached(oid) => oid.as_ref().to_string(),
        };

        self.update_ref_file(self.head_path(), raw_ref)
    }

    /// The commit HEAD currently resolves to.
    ///
    /// None in the empty-repository state (attached to an unborn branch).
    pub fn resolve_head(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Attached(name) => {
                let branch = self
                    .find_branch(name.as_ref())?
                    .with_context(|| format!("HEAD refers to unknown branch {}", name))?;
                Ok(branch.target)
            }
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// All branches, in creation order.
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let content = std::fs::read_to_string(self.branches_path())
            .with_context(|| "Failed to read branch table")?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_branch_line)
            .collect()
    }

    fn parse_branch_line(line: &str) -> anyhow::Result<Branch> {
        match line.split_once(' ') {
            Some((name, oid)) => Ok(Branch::new(
                BranchName::try_parse(name.to_string())?,
                Some(ObjectId::try_parse(oid.to_string())?),
            )),
            None => Ok(Branch::new(BranchName::try_parse(line.to_string())?, None)),
        }
    }

    /// Look a branch up by its raw name.
    ///
    /// Takes a plain string so lookups for names that would not validate
    /// (and therefore cannot exist) simply return None.
    pub fn find_branch(&self, name: &str) -> anyhow::Result<Option<Branch>> {
        Ok(self
            .list_branches()?
            .into_iter()
            .find(|branch| branch.name.as_ref() == name))
    }

    /// Append a branch to the table.
    ///
    /// Fails with a Conflict error when the name is taken; the table is left
    /// unchanged in that case.
    pub fn create_branch(
        &self,
        name: BranchName,
        target: Option<ObjectId>,
    ) -> anyhow::Result<()> {
        let mut branches = self.list_branches()?;

        if branches.iter().any(|branch| branch.name == name) {
            return Err(RepoError::BranchExists(name.to_string()).into());
        }

        branches.push(Branch::new(name, target));
        self.write_branches(&branches)
    }

    /// Move a branch to a new commit.
    pub fn advance_branch(&self, name: &BranchName, oid: ObjectId) -> anyhow::Result<()> {
        let mut branches = self.list_branches()?;

        let branch = branches
            .iter_mut()
            .find(|branch| branch.name == *name)
            .with_context(|| format!("cannot advance unknown branch {}", name))?;
        branch.target = Some(oid);

        self.write_branches(&branches)
    }

    fn write_branches(&self, branches: &[Branch]) -> anyhow::Result<()> {
        let table = branches
            .iter()
            .map(|branch| match &branch.target {
                Some(oid) => format!("{} {}\n", branch.name, oid),
                None => format!("{}\n", branch.name),
            })
            .collect::<String>();

        self.update_ref_file(self.branches_path(), table)
    }

    /// Rewrite a reference file under an exclusive lock.
    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
