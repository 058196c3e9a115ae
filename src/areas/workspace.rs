use crate::artifacts::checkout::migration::Migration;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".bantam", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn file_exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    /// Expand a workspace path into the files beneath it.
    ///
    /// A file path yields itself; a directory is walked recursively with the
    /// repository directory filtered out. Returned paths are relative to the
    /// workspace root.
    pub fn list_files(&self, root_file_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = std::fs::canonicalize(self.path.join(root_file_path))?;

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(vec![
                root_file_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ])
        }
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;
        if path.is_file() && !Self::is_ignored(relative_path) {
            Some(relative_path.to_path_buf())
        } else {
            None
        }
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let file_path = self.path.join(file_path);

        std::fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file {}", file_path.display()))
    }

    pub fn write_file(&self, file_path: &Path, data: &str) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories for {}", full_path.display())
            })?;
        }

        std::fs::write(&full_path, data)
            .with_context(|| format!("Failed to write file {}", full_path.display()))
    }

    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file {}", full_path.display()))?;
        }

        self.prune_empty_parent_dirs(&full_path)
    }

    // Applying removals before writes matters: a directory emptied by the
    // removals may be recreated by a write with the same prefix.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for path in migration.removals() {
            self.remove_file(path)?;
        }

        for (path, data) in migration.writes() {
            self.write_file(path, data)?;
        }

        Ok(())
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.path.as_ref()
            && parent.exists()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("Failed to remove empty directory {}", parent.display())
            })?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
