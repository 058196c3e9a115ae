//! Checkout reconciliation
//!
//! Moving HEAD to a different commit means making the working directory
//! match that commit's snapshot. The migration is planned in full (every
//! removal and every write, blob contents included) before a single file is
//! touched, and refs are only updated after the plan has been applied.

pub mod migration;
