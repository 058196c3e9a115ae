use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Report the staged file set: a header, the count, then each tracked
    /// path in lexicographic order.
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let mut index = self.index();
        index.rehydrate()?;

        writeln!(self.writer(), "Tracked files:")?;
        writeln!(self.writer(), "{} files total", index.len())?;
        for path in index.entries() {
            writeln!(self.writer(), "{}", path.display())?;
        }

        Ok(())
    }
}
