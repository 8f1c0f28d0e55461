//! Command implementations, each an `impl Repository` block
//!
//! - `plumbing`: object store inspection (cat-file)
//! - `porcelain`: local version control workflows (add, commit, merge, ...)
//! - `remote`: remotes and object transfer (add-remote, push, fetch, pull)

pub mod plumbing;
pub mod porcelain;
pub mod remote;
