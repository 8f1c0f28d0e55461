//! # gitlet
//!
//! A small, single-machine, content-addressable version-control system.
//!
//! The crate is split the same way a repository is laid out:
//!
//! - `areas`: the persistent parts of a repository (object store, staging area,
//!   refs, remotes, working directory) and the [`areas::repository::Repository`]
//!   handle tying them together
//! - `artifacts`: the data types and algorithms operating on those areas
//!   (objects, branch names, history traversal, checkout planning, merge, status,
//!   remote synchronization)
//! - `commands`: one module per user-facing command, each implemented as a method
//!   on the repository handle
//! - `errors`: the user-facing failure conditions

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
