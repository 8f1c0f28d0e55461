//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: create the repository directory
//! - `add`, `rm`: stage additions and removals
//! - `commit`: snapshot the stage
//! - `log`, `global-log`, `find`: browse history
//! - `status`: show branches, the stage and the working directory
//! - `checkout`, `reset`: restore files or whole snapshots
//! - `branch`, `rm-branch`: manage branch pointers
//! - `merge`: three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
