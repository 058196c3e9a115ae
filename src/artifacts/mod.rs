//! Data structures and algorithms
//!
//! This module contains the core types and algorithms of the engine:
//!
//! - `branch`: Branch name validation
//! - `checkout`: Working-directory reconciliation planning
//! - `core`: Shared utilities (pager wrapper)
//! - `index`: Index file format (header, entries, checksum)
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, commit, snapshot)

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod log;
pub mod objects;
