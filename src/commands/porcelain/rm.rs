use crate::areas::repository::Repository;
use crate::errors::RepoError;
use std::path::Path;

impl Repository {
    /// Unstage a path and remove its working copy (untrack implies remove).
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = Path::new(path);

        let mut index = self.index();
        index.rehydrate()?;

        if !index.remove(path) {
            return Err(RepoError::NotTracked(path.to_path_buf()).into());
        }

        index.write_updates()?;
        self.workspace().remove_file(path)?;

        Ok(())
    }
}
