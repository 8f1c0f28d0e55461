//! Working tree status inspection
//!
//! Compares the working directory against the staging area and the HEAD commit.
//!
//! ## Components
//!
//! - `file_change`: how an unstaged working file differs from what would be committed
//! - `status_info`: the five status sections and their rendering

pub mod file_change;
pub mod status_info;
