//! Checkout request forms
//!
//! Checkout has three distinct shapes on the command line; they are carried
//! as one exhaustive request type so every handler must deal with all of
//! them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRequest {
    /// `checkout -- <file>`: restore one file from the head commit.
    WorkingFile { name: String },
    /// `checkout <commit-id> -- <file>`: restore one file from a commit.
    /// The commit id may be abbreviated.
    CommitFile { commit: String, name: String },
    /// `checkout <branch>`: switch to a branch, replacing the working tree.
    Branch { name: String },
}
