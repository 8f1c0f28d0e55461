use crate::artifacts::branch::INVALID_REF_COMPONENT_REGEX;
use anyhow::Context;
use std::path::PathBuf;

fn validate_component(kind: &str, name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        anyhow::bail!("{kind} name cannot be empty");
    }

    let re = regex::Regex::new(INVALID_REF_COMPONENT_REGEX)
        .with_context(|| format!("invalid ref name regex: {INVALID_REF_COMPONENT_REGEX}"))?;

    if re.is_match(name) {
        anyhow::bail!("invalid {kind} name: {name}");
    }

    Ok(())
}

/// Name of a local branch, stored at `refs/heads/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        validate_component("branch", &name)?;
        Ok(Self(name))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a registered remote, stored at `remotes/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteName(String);

impl RemoteName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        validate_component("remote", &name)?;
        Ok(Self(name))
    }
}

impl AsRef<str> for RemoteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any branch HEAD can point at
///
/// Textual form is `branch` for local branches and `remote/branch` for
/// remote-tracking ones; that is also what HEAD stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RefName {
    Local(BranchName),
    Remote {
        remote: RemoteName,
        branch: BranchName,
    },
}

impl RefName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        match name.split_once('/') {
            Some((remote, branch)) => Ok(RefName::Remote {
                remote: RemoteName::try_parse(remote.to_string())?,
                branch: BranchName::try_parse(branch.to_string())?,
            }),
            None => Ok(RefName::Local(BranchName::try_parse(name.to_string())?)),
        }
    }

    /// Path of the ref file relative to the repository's `.gitlet` directory
    pub fn as_ref_path(&self) -> PathBuf {
        match self {
            RefName::Local(branch) => PathBuf::from("refs").join("heads").join(branch.as_ref()),
            RefName::Remote { remote, branch } => PathBuf::from("refs")
                .join("remotes")
                .join(remote.as_ref())
                .join(branch.as_ref()),
        }
    }
}

impl From<BranchName> for RefName {
    fn from(branch: BranchName) -> Self {
        RefName::Local(branch)
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefName::Local(branch) => write!(f, "{branch}"),
            RefName::Remote { remote, branch } => write!(f, "{remote}/{branch}"),
        }
    }
}
