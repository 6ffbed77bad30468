use crate::areas::database::Database;
use crate::areas::state::RepoState;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::JotError;
use bytes::Bytes;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the control directory at the repository root.
pub const CONTROL_DIR: &str = ".jot";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    state: RefCell<RepoState>,
}

impl Repository {
    /// Open an existing repository rooted at `path`.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let control_path = path.join(CONTROL_DIR);
        if !control_path.is_dir() {
            return Err(JotError::RepositoryMissing.into());
        }

        let database = Database::new(control_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let state = RepoState::load(&control_path.join("state"))?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            state: RefCell::new(state),
        })
    }

    pub(crate) fn from_parts(
        path: Box<Path>,
        writer: Box<dyn std::io::Write>,
        database: Database,
        workspace: Workspace,
        state: RepoState,
    ) -> Self {
        Repository {
            path,
            writer: RefCell::new(writer),
            database,
            workspace,
            state: RefCell::new(state),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state(&'_ self) -> Ref<'_, RepoState> {
        self.state.borrow()
    }

    pub fn state_mut(&'_ self) -> RefMut<'_, RepoState> {
        self.state.borrow_mut()
    }

    pub fn state_path(&self) -> PathBuf {
        self.path.join(CONTROL_DIR).join("state")
    }

    /// Write the in-memory state back to disk. Commands call this once, at
    /// the end of a successful mutation.
    pub fn persist_state(&self) -> anyhow::Result<()> {
        self.state.borrow().save(&self.state_path())
    }

    /// The commit the head branch points at.
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.state().head_commit_id()?.clone();
        self.database.load_commit(&head_oid)
    }

    pub fn head_snapshot(&self) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        Ok(self.head_commit()?.snapshot().clone())
    }

    /// Slim commit loader for the split-point search.
    pub fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.database.load_commit(oid)?.slim(oid.clone()))
    }

    /// Blob content loader for reconciliation and working-tree writes.
    pub fn blob_content(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        self.database.load_blob_content(oid)
    }
}
