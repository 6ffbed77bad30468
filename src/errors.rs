//! Typed failures surfaced by the core.
//!
//! Every variant carries the identifier (file, branch, or commit id) the
//! failure is about, so the CLI can render a message without re-deriving
//! details. [`JotError::kind`] projects variants onto the broad
//! classification used for reporting.

use thiserror::Error;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown object digest, unresolved commit id, or missing branch.
    NotFound,
    /// The operation was rejected by a precondition on its inputs or state.
    Validation,
    /// The working tree blocks the operation (untracked file in the way).
    ConflictingState,
    /// Underlying storage read/write failure.
    Io,
}

#[derive(Debug, Error)]
pub enum JotError {
    #[error("File does not exist: {0}")]
    FileNotFound(String),
    #[error("File does not exist in that commit: {0}")]
    FileNotInCommit(String),
    #[error("No commit with that id exists: {0}")]
    CommitNotFound(String),
    #[error("Ambiguous commit id prefix: {0}")]
    AmbiguousPrefix(String),
    #[error("Object not found in store: {0}")]
    ObjectNotFound(String),
    #[error("Found no commit with that message: {0}")]
    NoMatchingCommit(String),
    #[error("Please enter a commit message")]
    EmptyMessage,
    #[error("No changes added to the commit")]
    NothingToCommit,
    #[error("No reason to remove the file: {0}")]
    NothingToRemove(String),
    #[error("A branch with that name already exists: {0}")]
    BranchExists(String),
    #[error("A branch with that name does not exist: {0}")]
    NoSuchBranch(String),
    #[error("Cannot remove the current branch: {0}")]
    CannotDeleteCurrent(String),
    #[error("No need to checkout the current branch: {0}")]
    AlreadyOnBranch(String),
    #[error("Cannot merge a branch with itself: {0}")]
    CannotMergeSelf(String),
    #[error("You have uncommitted changes")]
    DirtyWorkingTree,
    #[error("There is an untracked file in the way; delete it, or add and commit it first: {0}")]
    UntrackedFileConflict(String),
    #[error("A jot repository already exists in the current directory")]
    RepositoryExists,
    #[error("Not in an initialized jot repository")]
    RepositoryMissing,
}

impl JotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JotError::FileNotFound(_)
            | JotError::FileNotInCommit(_)
            | JotError::CommitNotFound(_)
            | JotError::AmbiguousPrefix(_)
            | JotError::ObjectNotFound(_)
            | JotError::NoMatchingCommit(_)
            | JotError::NoSuchBranch(_)
            | JotError::RepositoryMissing => ErrorKind::NotFound,
            JotError::EmptyMessage
            | JotError::NothingToCommit
            | JotError::NothingToRemove(_)
            | JotError::BranchExists(_)
            | JotError::CannotDeleteCurrent(_)
            | JotError::AlreadyOnBranch(_)
            | JotError::CannotMergeSelf(_)
            | JotError::DirtyWorkingTree
            | JotError::RepositoryExists => ErrorKind::Validation,
            JotError::UntrackedFileConflict(_) => ErrorKind::ConflictingState,
        }
    }
}
