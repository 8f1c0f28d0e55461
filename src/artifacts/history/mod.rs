//! Commit history traversal
//!
//! - `rev_list`: the first-parent chain followed by `log`
//! - `ancestors_of`: every commit reachable through any parent edge
//!
//! Walks are iterative with explicit stacks and visited sets; histories can be
//! arbitrarily deep.

pub mod rev_list;

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Every commit reachable from `start` through any parent, `start` included
pub fn ancestors_of(database: &Database, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
    let mut visited = HashSet::new();
    let mut stack = vec![start.clone()];

    while let Some(oid) = stack.pop() {
        if !visited.insert(oid.clone()) {
            continue;
        }

        let commit = database.load_commit(&oid)?;
        stack.extend(
            commit
                .parents()
                .iter()
                .filter(|parent| !visited.contains(*parent))
                .cloned(),
        );
    }

    Ok(visited)
}
