//! Data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch name validation
//! - `checkout`: The checkout request forms
//! - `core`: Shared utilities (pager wrapper)
//! - `merge`: Split-point search and three-way reconciliation
//! - `objects`: Stored object types (blob, commit)

pub mod branch;
pub mod checkout;
pub mod core;
pub mod merge;
pub mod objects;
