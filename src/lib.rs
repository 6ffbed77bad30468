//! jot — a minimal local version-control engine.
//!
//! The crate is organized in three layers:
//!
//! - `areas`: the repository components (object database, repository state,
//!   working tree)
//! - `artifacts`: data structures and algorithms (objects, branch names,
//!   split-point search, merge reconciliation)
//! - `commands`: user-facing operations implemented on [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
