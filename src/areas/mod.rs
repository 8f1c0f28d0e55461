//! Repository areas
//!
//! - `database`: object store for blobs and commits
//! - `stage`: staging area for the next commit
//! - `refs`: HEAD, local branches and remote-tracking branches
//! - `remotes`: registered remote repositories
//! - `workspace`: working directory file system operations
//! - `repository`: the handle tying the areas together

pub(crate) mod database;
pub(crate) mod refs;
pub(crate) mod remotes;
pub mod repository;
pub(crate) mod stage;
pub(crate) mod workspace;
