#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Index-addressed storage for crates.
//!
//! Every crate of a run lives in one [`CrateArena`]. A crate record holds its
//! label and the id of the crate directly below it, so a stack is simply a
//! chain of ids starting at its top. Moving crates between stacks rewrites
//! `below` links; labels are never copied and records are never freed
//! individually. Dropping the arena releases every crate at once.

use std::ops::{Index, IndexMut};

/// Stable handle to a crate record inside a [`CrateArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrateId(usize);

impl CrateId {
    /// Position of the record in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single crate: its label and the crate beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrateRecord {
    /// The character painted on the crate.
    pub label: char,
    /// The crate directly below this one, `None` at the bottom of a stack.
    pub below: Option<CrateId>,
}

/// Owner of every crate record created during a run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrateArena {
    records: Vec<CrateRecord>,
}

impl Index<CrateId> for CrateArena {
    type Output = CrateRecord;

    fn index(&self, index: CrateId) -> &Self::Output {
        &self.records[index.0]
    }
}

impl IndexMut<CrateId> for CrateArena {
    fn index_mut(&mut self, index: CrateId) -> &mut Self::Output {
        &mut self.records[index.0]
    }
}

impl CrateArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` crates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Creates an unlinked crate and returns its id.
    pub fn alloc(&mut self, label: char) -> CrateId {
        let id = CrateId(self.records.len());
        self.records.push(CrateRecord { label, below: None });
        id
    }

    /// Label of crate `id`.
    #[must_use]
    pub fn label(&self, id: CrateId) -> char {
        self[id].label
    }

    /// The crate directly below `id`, if any.
    #[must_use]
    pub fn below(&self, id: CrateId) -> Option<CrateId> {
        self[id].below
    }

    /// Rewrites the `below` link of `id`.
    pub fn set_below(&mut self, id: CrateId, below: Option<CrateId>) {
        self[id].below = below;
    }

    /// Number of crates allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no crate has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Walks a chain from `top` downwards.
    pub fn chain(&self, top: Option<CrateId>) -> Chain<'_> {
        Chain {
            arena: self,
            next: top,
        }
    }
}

/// Iterator over the ids of a chain, top first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    arena: &'a CrateArena,
    next: Option<CrateId>,
}

impl Iterator for Chain<'_> {
    type Item = CrateId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena.below(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_alloc_assigns_sequential_ids() {
        let mut arena = CrateArena::new();
        let a = arena.alloc('A');
        let b = arena.alloc('B');

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.label(b), 'B');
        assert_eq!(arena.below(a), None);
    }

    #[test]
    fn test_chain_follows_below_links() {
        let mut arena = CrateArena::with_capacity(3);
        let top = arena.alloc('N');
        let middle = arena.alloc('Z');
        let bottom = arena.alloc('Q');
        arena.set_below(top, Some(middle));
        arena.set_below(middle, Some(bottom));

        let labels = arena
            .chain(Some(top))
            .map(|id| arena.label(id))
            .collect_vec();
        assert_eq!(labels, vec!['N', 'Z', 'Q']);
        assert_eq!(arena.chain(None).count(), 0);
    }
}
