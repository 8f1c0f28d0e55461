//! Branch and remote names
//!
//! Local branch names are single path components: a name containing `/` always
//! addresses a remote-tracking branch as `remote/branch`.

pub mod branch_name;

/// Characters and sequences a single ref component cannot contain
pub const INVALID_REF_COMPONENT_REGEX: &str =
    r"^\.|\.\.|\/|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";
