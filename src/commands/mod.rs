//! Command implementations
//!
//! User-facing operations, implemented as `impl Repository` blocks in
//! `porcelain`. The CLI binary parses arguments and dispatches here; the
//! commands own the semantics and write their output through the
//! repository writer.

pub mod porcelain;
