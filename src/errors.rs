//! User-visible failure conditions.
//!
//! Every porcelain operation that can fail raises one of these variants; the
//! binary renders it once, at the boundary, as a single `ERROR: <message>`
//! line on stderr. The display templates are a compatibility contract and
//! must not be reworded.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure, used to pick the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A branch, commit, or file the operation needs does not exist.
    NotFound,
    /// The operation would collide with something that already exists.
    Conflict,
    /// The repository is not in a state that permits the operation.
    InvalidState,
    /// An underlying filesystem operation failed.
    Io,
}

/// Structured error carrying the parameters of each failure condition.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("No branch {0} exists")]
    NoSuchBranch(String),

    #[error("Commit {0} does not exist")]
    NoSuchCommit(String),

    #[error("File {} does not exist", .0.display())]
    NoSuchFile(PathBuf),

    #[error("File {} not tracked", .0.display())]
    NotTracked(PathBuf),

    #[error("A branch named {0} already exists")]
    BranchExists(String),

    #[error("A repository already exists in {}", .0.display())]
    RepositoryExists(PathBuf),

    #[error("Not a repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Need to be on a branch to commit")]
    DetachedHead,

    #[error("Nothing to commit")]
    NothingToCommit,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSuchBranch(_)
            | Self::NoSuchCommit(_)
            | Self::NoSuchFile(_)
            | Self::NotTracked(_) => ErrorKind::NotFound,
            Self::BranchExists(_) | Self::RepositoryExists(_) => ErrorKind::Conflict,
            Self::NotARepository(_)
            | Self::InvalidBranchName(_)
            | Self::DetachedHead
            | Self::NothingToCommit => ErrorKind::InvalidState,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::NotFound => 1,
            ErrorKind::Conflict => 2,
            ErrorKind::InvalidState => 3,
            ErrorKind::Io => 4,
        }
    }
}
