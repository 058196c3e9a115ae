use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::RepoError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the hidden repository directory
pub const REPO_DIR: &str = ".bantam";

/// One opened repository: the wiring between the workspace, the staging
/// index, the reference files, and the object database.
///
/// All porcelain operations are methods on this type (see
/// `commands::porcelain`); the struct itself only holds state and hands out
/// access to its components.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let index = Index::new(path.join(REPO_DIR).join("index").into_boxed_path());
        let database = Database::new(path.join(REPO_DIR).join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(REPO_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo_path(&self) -> Box<Path> {
        self.path.join(REPO_DIR).into_boxed_path()
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Every operation except `init` requires an existing repository.
    pub(crate) fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.repo_path().exists() {
            return Err(RepoError::NotARepository(self.path.to_path_buf()).into());
        }

        Ok(())
    }
}
