use crate::areas::repository::Repository;
use crate::artifacts::merge::reconcile::{MergedFile, Reconciliation, reconcile};
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Merge another branch into the head branch.
    ///
    /// After validation the split point decides the shape of the merge:
    /// given head == split means there is nothing to do; current head ==
    /// split fast-forwards the branch pointer; anything else reconciles the
    /// three snapshots and finishes with a two-parent commit, conflicts
    /// included.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let given_oid = self
            .state()
            .branch_target(branch_name)
            .cloned()
            .ok_or_else(|| JotError::NoSuchBranch(branch_name.to_string()))?;
        if self.state().has_pending_changes() {
            return Err(JotError::DirtyWorkingTree.into());
        }
        if branch_name == self.state().head_branch() {
            return Err(JotError::CannotMergeSelf(branch_name.to_string()).into());
        }
        let head_oid = self.state().head_commit_id()?.clone();

        let split_oid = SplitFinder::new(|oid: &ObjectId| self.slim_commit(oid))
            .find_split_point(&head_oid, &given_oid)?
            .ok_or_else(|| anyhow::anyhow!("no common ancestor between the two branches"))?;

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_oid == head_oid {
            return self.fast_forward(&given_oid);
        }

        let head_snapshot = self.head_snapshot()?;
        self.workspace()
            .check_for_untracked(&head_snapshot, self.state().staging())?;

        let split_snapshot = self.database().load_commit(&split_oid)?.snapshot().clone();
        let given_snapshot = self.database().load_commit(&given_oid)?.snapshot().clone();

        let reconciliation = reconcile(&split_snapshot, &head_snapshot, &given_snapshot, |oid| {
            self.blob_content(oid)
        })?;

        self.apply_reconciliation(&head_snapshot, &reconciliation)?;

        let message = format!(
            "Merged {} into {}.",
            branch_name,
            self.state().head_branch()
        );
        self.write_commit(&message, vec![given_oid])?;

        if !reconciliation.conflicts.is_empty() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// The current head is the split point: adopt the given branch's tree
    /// and move the branch pointer, with no merge commit.
    fn fast_forward(&mut self, given_oid: &ObjectId) -> anyhow::Result<()> {
        let head_snapshot = self.head_snapshot()?;
        self.workspace()
            .check_for_untracked(&head_snapshot, self.state().staging())?;

        let given_commit = self.database().load_commit(given_oid)?;
        self.workspace()
            .replace_with_snapshot(given_commit.snapshot(), |oid| self.blob_content(oid))?;

        {
            let mut state = self.state_mut();
            state.advance_head(given_oid.clone());
            state.clear_pending();
        }
        self.persist_state()?;

        writeln!(self.writer(), "Current branch fast-forwarded.")?;
        Ok(())
    }

    /// Materialize the reconciled snapshot: removals leave the working tree
    /// and join the removed set; taken and conflicted files are written out
    /// and staged, so the closing commit records exactly the merged state.
    fn apply_reconciliation(
        &mut self,
        current_snapshot: &BTreeMap<String, ObjectId>,
        reconciliation: &Reconciliation,
    ) -> anyhow::Result<()> {
        for file_name in current_snapshot.keys() {
            if !reconciliation.merged.contains_key(file_name) {
                self.state_mut().mark_removed(file_name.clone());
                self.workspace().delete_file(file_name)?;
            }
        }

        for (file_name, merged_file) in &reconciliation.merged {
            match merged_file {
                MergedFile::Unchanged(_) => {}
                MergedFile::Updated(blob_oid) => {
                    let content = self.blob_content(blob_oid)?;
                    self.workspace().write_file(file_name, &content)?;
                    self.state_mut()
                        .stage_entry(file_name.clone(), blob_oid.clone());
                }
                MergedFile::Conflicted(content) => {
                    self.workspace().write_file(file_name, content)?;

                    let blob = Blob::new(file_name.clone(), content.clone());
                    let blob_oid = blob.object_id()?;
                    self.database().store(blob)?;
                    self.state_mut().stage_entry(file_name.clone(), blob_oid);
                }
            }
        }

        Ok(())
    }
}
