//! Gitlet object types and operations
//!
//! Gitlet stores all content as immutable objects identified by SHA-1 hashes of
//! their canonical byte representation. There are two types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot of every tracked path plus history metadata
//!
//! The object type never appears inside the serialized form: it decides which
//! part of the object store an object lives in.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest commit id abbreviation accepted on the command line
pub const MIN_ABBREVIATION_LENGTH: usize = 6;

/// Length of the abbreviated ids shown in merge log entries
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
