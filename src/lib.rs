//! bantam, a tiny snapshot-based version control engine.
//!
//! The crate is organized the way repository data flows:
//!
//! - `areas`: the places state lives (workspace, index, refs, object database)
//! - `artifacts`: the data structures and algorithms that move between them
//! - `commands`: the user-facing porcelain operations
//! - `errors`: the structured failure conditions surfaced to the user

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
