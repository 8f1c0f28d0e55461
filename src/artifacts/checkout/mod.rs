//! Working directory transitions between commit snapshots
//!
//! Used by `checkout <branch>`, `reset` and merge fast-forwards. The whole
//! transition is planned, and checked against untracked files, before any file
//! is touched.

pub mod migration;
