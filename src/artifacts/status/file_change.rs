/// Change to a tracked or staged file that is not reflected in the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceChange {
    Modified,
    Deleted,
}

impl std::fmt::Display for WorkspaceChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceChange::Modified => write!(f, "modified"),
            WorkspaceChange::Deleted => write!(f, "deleted"),
        }
    }
}
