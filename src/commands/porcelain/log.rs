use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use std::io::Write;

impl Repository {
    /// Print the commit chain reachable from HEAD, newest first.
    ///
    /// Each commit is framed as a blank line, the commit id line, and the
    /// message indented by four spaces; one final blank line closes the
    /// sequence. An empty history prints nothing.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let start = self.refs().resolve_head()?;
        let mut chain_is_empty = true;

        for (oid, commit) in RevList::new(self, start).iter() {
            writeln!(self.writer())?;
            writeln!(self.writer(), "commit {}", oid)?;
            for message_line in commit.message().lines() {
                writeln!(self.writer(), "    {}", message_line)?;
            }
            chain_is_empty = false;
        }

        if !chain_is_empty {
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
