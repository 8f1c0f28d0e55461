//! Plumbing commands (direct access to the object store)
//!
//! - `cat-file`: print the describable form of a commit or blob

pub mod cat_file;
