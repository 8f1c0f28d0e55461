//! Split point (lowest common ancestor) search
//!
//! The split point of two commits is the common ancestor a three-way merge
//! compares both sides against.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Find All Common Ancestors
//!
//! Two depth-first walks, one from each commit, follow every parent edge and
//! mark the commits they reach. A commit marked by both walks is a common
//! ancestor. The walk from the current commit also records its pre-order,
//! visiting first parents before second parents.
//!
//! ### Phase 2: Filter Redundant Ancestors
//!
//! > A common ancestor that is a parent of another common ancestor cannot be
//! > the lowest one.
//!
//! Such commits are marked REDUNDANT. What remains are the common ancestors
//! no other common ancestor descends from; criss-cross histories can leave
//! several.
//!
//! ### Phase 3: Pick One
//!
//! The remaining candidate met earliest in the pre-order of the current
//! commit's walk wins, so the mainline is preferred.
//!
//! ## Debug Logging
//!
//! Building with the `debug_merge` feature traces the visit states and the
//! chosen split point through `log::debug!`.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::HashMap;
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            log::debug!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b000;
        const VISITED_FROM_CURRENT = 0b001;
        const VISITED_FROM_TARGET = 0b010;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_CURRENT.bits() | Self::VISITED_FROM_TARGET.bits();
        const REDUNDANT = 0b100;
    }
}

impl VisitState {
    fn is_common(&self) -> bool {
        self.contains(VisitState::VISITED_FROM_BOTH)
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::REDUNDANT) {
            flags.push("REDUNDANT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the split point of two commits
///
/// Generic over the function loading a commit's parents, so the search runs the
/// same against the object store or an in-memory graph.
pub struct SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Split point of `current` and `target`, `None` for unrelated histories
    ///
    /// When one commit is an ancestor of the other, that commit is the result.
    pub fn find(&self, current: &ObjectId, target: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();
        let mut parents = HashMap::<ObjectId, Vec<ObjectId>>::new();

        let current_order = self.walk(
            current,
            VisitState::VISITED_FROM_CURRENT,
            &mut states,
            &mut parents,
        )?;
        self.walk(
            target,
            VisitState::VISITED_FROM_TARGET,
            &mut states,
            &mut parents,
        )?;

        let common = states
            .iter()
            .filter(|(_, state)| state.is_common())
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();
        for oid in &common {
            for parent in parents.get(oid).into_iter().flatten() {
                if let Some(state) = states.get_mut(parent)
                    && state.is_common()
                {
                    state.insert(VisitState::REDUNDANT);
                }
            }
        }

        debug_log!("split point states for {} <-> {}:", current, target);
        debug_log!("{:?}", states);

        let split_point = current_order.into_iter().find(|oid| {
            states
                .get(oid)
                .is_some_and(|state| state.is_common() && !state.contains(VisitState::REDUNDANT))
        });

        debug_log!("split point: {:?}", split_point);
        Ok(split_point)
    }

    /// Depth-first pre-order walk marking every reached commit with `flag`
    fn walk(
        &self,
        start: &ObjectId,
        flag: VisitState,
        states: &mut HashMap<ObjectId, VisitState>,
        parents: &mut HashMap<ObjectId, Vec<ObjectId>>,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let mut order = Vec::new();
        let mut stack = vec![start.clone()];

        while let Some(oid) = stack.pop() {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(flag) {
                continue;
            }
            state.insert(flag);
            order.push(oid.clone());

            if !parents.contains_key(&oid) {
                parents.insert(oid.clone(), (self.parents_loader)(&oid)?);
            }
            // reversed so the first parent is popped first
            for parent in parents[&oid].iter().rev() {
                if !states.get(parent).is_some_and(|state| state.contains(flag)) {
                    stack.push(parent.clone());
                }
            }
        }

        Ok(order)
    }
}
