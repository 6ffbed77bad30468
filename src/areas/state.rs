//! Repository state record
//!
//! The one mutable record of the repository: the branch table, the head
//! branch name, the staging area (file name → blob digest) and the removed
//! set. Loaded into memory at the start of a command and persisted back at
//! the end as a single JSON document at `.jot/state`, replaced atomically
//! (write to a temporary name, then rename).
//!
//! Invariants held by construction:
//! - the head branch is always a key of the branch table
//! - a file name is never staged and marked removed at the same time;
//!   staging cancels a pending removal and removal drops a staged entry

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use anyhow::Context;
use fake::rand;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Branch every repository starts on.
pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    branches: BTreeMap<String, ObjectId>,
    head: String,
    staging: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
}

impl RepoState {
    /// Fresh state for a new repository: the default branch pointing at the
    /// root commit, empty staging area and removed set.
    pub fn bootstrap(root_commit: ObjectId) -> Self {
        RepoState {
            branches: BTreeMap::from([(DEFAULT_BRANCH.to_string(), root_commit)]),
            head: DEFAULT_BRANCH.to_string(),
            staging: BTreeMap::new(),
            removed: BTreeSet::new(),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read state file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Unable to parse state file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self).context("Unable to encode state")?;
        let state_dir = path
            .parent()
            .with_context(|| format!("Invalid state path {}", path.display()))?;
        let temp_path = state_dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        std::fs::write(&temp_path, content)
            .with_context(|| format!("Unable to write state file {}", temp_path.display()))?;

        // rename the temp file over the state file to make the replace atomic
        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Unable to rename state file to {}", path.display()))?;

        Ok(())
    }

    pub fn head_branch(&self) -> &str {
        &self.head
    }

    /// The commit id the head branch points at.
    pub fn head_commit_id(&self) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(&self.head)
            .with_context(|| format!("head branch {} missing from the branch table", self.head))
    }

    pub fn branches(&self) -> &BTreeMap<String, ObjectId> {
        &self.branches
    }

    pub fn branch_target(&self, name: &str) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn create_branch(&mut self, name: String, target: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            return Err(JotError::BranchExists(name).into());
        }

        self.branches.insert(name, target);
        Ok(())
    }

    pub fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.branches.contains_key(name) {
            return Err(JotError::NoSuchBranch(name.to_string()).into());
        }
        if name == self.head {
            return Err(JotError::CannotDeleteCurrent(name.to_string()).into());
        }

        self.branches.remove(name);
        Ok(())
    }

    /// Point the head branch at a new commit.
    pub fn advance_head(&mut self, commit_id: ObjectId) {
        self.branches.insert(self.head.clone(), commit_id);
    }

    /// Make another existing branch the head.
    pub fn switch_head(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.branches.contains_key(name) {
            return Err(JotError::NoSuchBranch(name.to_string()).into());
        }

        self.head = name.to_string();
        Ok(())
    }

    pub fn staging(&self) -> &BTreeMap<String, ObjectId> {
        &self.staging
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn is_staged(&self, file_name: &str) -> bool {
        self.staging.contains_key(file_name)
    }

    /// Stage a file for the next commit, cancelling any pending removal.
    pub fn stage_entry(&mut self, file_name: String, blob_id: ObjectId) {
        self.removed.remove(&file_name);
        self.staging.insert(file_name, blob_id);
    }

    /// Drop a staged entry. Returns whether one was present.
    pub fn unstage(&mut self, file_name: &str) -> bool {
        self.staging.remove(file_name).is_some()
    }

    /// Cancel a pending removal without staging anything.
    pub fn cancel_removal(&mut self, file_name: &str) -> bool {
        self.removed.remove(file_name)
    }

    /// Mark a tracked file for untracking, dropping any staged entry.
    pub fn mark_removed(&mut self, file_name: String) {
        self.staging.remove(&file_name);
        self.removed.insert(file_name);
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.staging.is_empty() || !self.removed.is_empty()
    }

    pub fn clear_pending(&mut self) {
        self.staging.clear();
        self.removed.clear();
    }

    /// The snapshot the next commit would record: the base snapshot with
    /// every staged entry applied and every removed name dropped.
    pub fn next_snapshot(
        &self,
        base: &BTreeMap<String, ObjectId>,
    ) -> BTreeMap<String, ObjectId> {
        let mut snapshot = base.clone();
        for (file_name, blob_id) in &self.staging {
            snapshot.insert(file_name.clone(), blob_id.clone());
        }
        for file_name in &self.removed {
            snapshot.remove(file_name);
        }

        snapshot
    }
}
