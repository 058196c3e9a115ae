use crate::areas::repository::Repository;
use crate::errors::RepoError;
use std::path::Path;

impl Repository {
    /// Stage a path for the next commit.
    ///
    /// The path must exist in the workspace; a directory is expanded to the
    /// files beneath it. Staging an already-staged path is a no-op success.
    /// No content is captured here; contents are read at commit time.
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let path = Path::new(path);
        if !self.workspace().file_exists(path) {
            return Err(RepoError::NoSuchFile(path.to_path_buf()).into());
        }

        let mut index = self.index();
        index.rehydrate()?;

        for file in self.workspace().list_files(path)? {
            index.add(file);
        }

        index.write_updates()?;

        Ok(())
    }
}
