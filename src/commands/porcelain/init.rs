use crate::areas::database::Database;
use crate::areas::repository::{CONTROL_DIR, Repository};
use crate::areas::state::{DEFAULT_BRANCH, RepoState};
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::JotError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create a new repository at `path`: the control directory, the object
    /// store holding the root commit, and the state record with the default
    /// branch pointing at it.
    pub fn init(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let control_path = path.join(CONTROL_DIR);
        if control_path.exists() {
            return Err(JotError::RepositoryExists.into());
        }

        let database = Database::new(control_path.join("objects").into_boxed_path());
        fs::create_dir_all(database.objects_path())
            .context("Failed to create the objects directory")?;

        let root_commit = Commit::root(DEFAULT_BRANCH.to_string());
        let root_oid = root_commit.object_id()?;
        database.store(root_commit)?;

        let state = RepoState::bootstrap(root_oid);
        state.save(&control_path.join("state"))?;

        let workspace = Workspace::new(path.clone().into_boxed_path());
        let repository =
            Self::from_parts(path.into_boxed_path(), writer, database, workspace, state);

        writeln!(
            repository.writer(),
            "Initialized empty jot repository in {}",
            repository.path().display()
        )?;

        Ok(repository)
    }
}
