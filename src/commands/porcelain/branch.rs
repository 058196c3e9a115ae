use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// List every branch in creation order, marking the attached one.
    ///
    /// In detached HEAD state no branch carries the marker: the detached
    /// commit itself is not a branch.
    pub fn branch(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.refs().read_head()?;

        for branch in self.refs().list_branches()? {
            let marker = match &head {
                Head::Attached(name) if *name == branch.name => "* ",
                _ => "  ",
            };
            writeln!(self.writer(), "{}{}", marker, branch.name)?;
        }

        Ok(())
    }
}
