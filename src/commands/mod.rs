//! Command implementations
//!
//! Each user-facing operation lives in its own file under `porcelain` and is
//! implemented as a method on [`crate::areas::repository::Repository`]. The
//! commands stay quiet on success; only the reporters (`branch`, `log`,
//! `status`) produce stdout output, and failures are rendered by the binary
//! at the process boundary.

pub mod porcelain;
