use crate::areas::repository::Repository;
use crate::artifacts::checkout::CheckoutRequest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    pub fn checkout(&mut self, request: CheckoutRequest) -> anyhow::Result<()> {
        match request {
            CheckoutRequest::WorkingFile { name } => {
                let snapshot = self.head_snapshot()?;
                self.restore_file(&snapshot, &name)
            }
            CheckoutRequest::CommitFile { commit, name } => {
                let commit_oid = self.database().resolve_commit_prefix(&commit)?;
                let commit = self.database().load_commit(&commit_oid)?;
                self.restore_file(commit.snapshot(), &name)
            }
            CheckoutRequest::Branch { name } => self.checkout_branch(&name),
        }
    }

    /// Overwrite one working file with the blob a snapshot tracks for it.
    fn restore_file(
        &self,
        snapshot: &BTreeMap<String, ObjectId>,
        file_name: &str,
    ) -> anyhow::Result<()> {
        let blob_oid = snapshot
            .get(file_name)
            .ok_or_else(|| JotError::FileNotInCommit(file_name.to_string()))?;
        let content = self.blob_content(blob_oid)?;

        self.workspace().write_file(file_name, &content)
    }

    /// Switch to another branch: replace the working tree with its head
    /// commit's snapshot and clear all pending changes.
    fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let target_oid = self
            .state()
            .branch_target(name)
            .ok_or_else(|| JotError::NoSuchBranch(name.to_string()))?
            .clone();
        if name == self.state().head_branch() {
            return Err(JotError::AlreadyOnBranch(name.to_string()).into());
        }

        let head_snapshot = self.head_snapshot()?;
        self.workspace()
            .check_for_untracked(&head_snapshot, self.state().staging())?;

        let target_commit = self.database().load_commit(&target_oid)?;
        self.workspace()
            .replace_with_snapshot(target_commit.snapshot(), |oid| self.blob_content(oid))?;

        {
            let mut state = self.state_mut();
            state.switch_head(name)?;
            state.clear_pending();
        }
        self.persist_state()?;

        writeln!(self.writer(), "Switched to branch '{}'", name)?;
        Ok(())
    }
}
