//! Remote commands
//!
//! A remote is another repository's `.gitlet` directory on the same
//! filesystem. Object transfer copies compressed objects verbatim and only
//! ever moves refs; working directories are never touched on the remote side.

pub mod add_remote;
pub mod fetch;
pub mod push;
