//! Gitlet data structures and algorithms
//!
//! - `branch`: branch, remote and ref names
//! - `checkout`: working directory migrations and the untracked file check
//! - `core`: output plumbing (pager adapter)
//! - `history`: commit graph traversal
//! - `merge`: split point search and per-file merge decisions
//! - `objects`: object types (blob, commit) and ids
//! - `status`: status report
//! - `sync`: object transfer between repositories

pub mod branch;
pub mod checkout;
pub mod core;
pub mod history;
pub mod merge;
pub mod objects;
pub mod status;
pub mod sync;
