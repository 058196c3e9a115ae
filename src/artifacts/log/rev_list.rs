use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Walk over the commit chain, newest to oldest.
///
/// The walk is iterative, so history length never translates into stack
/// depth.
#[derive(new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start: Option<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn iter(self) -> RevListIter<'r> {
        RevListIter {
            repository: self.repository,
            current_commit_oid: self.start,
        }
    }
}

pub struct RevListIter<'r> {
    repository: &'r Repository,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIter<'_> {
    type Item = (ObjectId, Commit);

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.repository.database().parse_object_as_commit(&commit_oid) {
            Ok(Some(commit)) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some((commit_oid, commit))
            }
            // A broken chain ends the iteration
            _ => None,
        }
    }
}
