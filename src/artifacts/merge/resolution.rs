//! Per-file three-way merge decisions
//!
//! A side "changed" a path when its blob id differs from the split point's;
//! absence counts as a distinct state, so adding and deleting are changes too.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// What the merge does with one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// Leave the current version (or its absence) alone
    KeepCurrent,
    /// Check out and stage the target's version
    TakeTarget(ObjectId),
    /// Delete the file and stage its removal
    Delete,
    /// Both sides changed the path in different ways
    Conflict {
        current: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

pub fn resolve_file(
    split: Option<&ObjectId>,
    current: Option<&ObjectId>,
    target: Option<&ObjectId>,
) -> FileResolution {
    let current_changed = current != split;
    let target_changed = target != split;

    match (current_changed, target_changed) {
        (false, true) => match target {
            Some(oid) => FileResolution::TakeTarget(oid.clone()),
            None => FileResolution::Delete,
        },
        (true, true) if current != target => FileResolution::Conflict {
            current: current.cloned(),
            target: target.cloned(),
        },
        _ => FileResolution::KeepCurrent,
    }
}

/// Every path the merge has to act on, sorted, with its resolution
pub fn resolve_commits(
    split: &Commit,
    current: &Commit,
    target: &Commit,
) -> Vec<(PathBuf, FileResolution)> {
    let paths = split
        .tracked()
        .keys()
        .chain(current.tracked().keys())
        .chain(target.tracked().keys())
        .collect::<BTreeSet<_>>();

    paths
        .into_iter()
        .map(|path| {
            let resolution = resolve_file(
                split.blob_for(path),
                current.blob_for(path),
                target.blob_for(path),
            );
            (path.clone(), resolution)
        })
        .filter(|(_, resolution)| resolution != &FileResolution::KeepCurrent)
        .collect()
}

fn push_side(content: &mut Vec<u8>, side: Option<&[u8]>) {
    if let Some(side) = side
        && !side.is_empty()
    {
        content.extend_from_slice(side);
        if !side.ends_with(b"\n") {
            content.push(b'\n');
        }
    }
}

/// Content written in place of a conflicted file
///
/// An absent side contributes nothing between its markers.
pub fn conflict_content(current: Option<&[u8]>, target: Option<&[u8]>) -> Vec<u8> {
    let mut content = b"<<<<<<< HEAD\n".to_vec();
    push_side(&mut content, current);
    content.extend_from_slice(b"=======\n");
    push_side(&mut content, target);
    content.extend_from_slice(b">>>>>>>\n");

    content
}
