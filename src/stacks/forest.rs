#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The stack forest: one arena of crates plus the head of every stack.
//!
//! The forest only exposes relinking primitives. Which primitives an
//! instruction uses, and in what order, is decided by the rearrangement
//! policies in [`crate::stacks::policy`].

use crate::stacks::arena::{CrateArena, CrateId};
use crate::stacks::error::{Error, Result};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// All stacks of a run, indexed `0..N-1` in diagram order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackForest {
    arena: CrateArena,
    heads: Vec<Option<CrateId>>,
}

impl StackForest {
    /// Creates `stacks` empty stacks.
    #[must_use]
    pub fn with_stacks(stacks: usize) -> Self {
        Self {
            arena: CrateArena::new(),
            heads: vec![None; stacks],
        }
    }

    /// Builds a forest from labels listed top first for every stack.
    ///
    /// Mostly useful for tests and benchmarks; real input goes through
    /// [`crate::stacks::diagram::load_stacks`].
    #[must_use]
    pub fn from_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut forest = Self::with_stacks(columns.len());
        for (stack, column) in columns.iter().enumerate() {
            let mut tail = None;
            for label in column.as_ref().chars() {
                tail = Some(forest.append_below(stack, tail, label));
            }
        }
        forest
    }

    /// Number of stacks, `N`.
    #[must_use]
    pub fn num_stacks(&self) -> usize {
        self.heads.len()
    }

    /// Total number of crates across all stacks.
    #[must_use]
    pub fn num_crates(&self) -> usize {
        self.arena.len()
    }

    /// Backing arena of every crate in the forest.
    #[must_use]
    pub const fn arena(&self) -> &CrateArena {
        &self.arena
    }

    /// Label of the top crate of `stack`, `None` if the stack is empty or
    /// does not exist.
    #[must_use]
    pub fn top(&self, stack: usize) -> Option<char> {
        let head = (*self.heads.get(stack)?)?;
        Some(self.arena.label(head))
    }

    /// Tops of every stack in index order.
    #[must_use]
    pub fn tops(&self) -> Vec<Option<char>> {
        (0..self.num_stacks()).map(|i| self.top(i)).collect_vec()
    }

    /// Number of crates in `stack`. Walks the whole chain.
    #[must_use]
    pub fn depth(&self, stack: usize) -> usize {
        self.heads
            .get(stack)
            .map_or(0, |&head| self.arena.chain(head).count())
    }

    /// Labels of `stack`, top first.
    pub fn labels(&self, stack: usize) -> impl Iterator<Item = char> + '_ {
        let head = self.heads.get(stack).copied().flatten();
        self.arena.chain(head).map(|id| self.arena.label(id))
    }

    /// Labels of `stack` as a string, top first.
    #[must_use]
    pub fn column(&self, stack: usize) -> String {
        self.labels(stack).collect()
    }

    pub(crate) fn check_stack(&self, stack: usize) -> Result<()> {
        if stack < self.num_stacks() {
            Ok(())
        } else {
            Err(Error::UnknownStack {
                stack,
                stacks: self.num_stacks(),
            })
        }
    }

    /// Returns the `count`-th crate of `stack` counting from the top (1 is
    /// the top itself), or `UnderflowMove` if the stack is shallower.
    ///
    /// Only walks `count` links, so checking a move costs as much as the
    /// move itself. `count` must be positive.
    pub(crate) fn nth_from_top(&self, stack: usize, count: usize) -> Result<CrateId> {
        debug_assert!(count > 0);
        let mut walked = 0;
        let mut last = None;
        for id in self.arena.chain(self.heads[stack]).take(count) {
            walked += 1;
            last = Some(id);
        }
        match last {
            Some(id) if walked == count => Ok(id),
            _ => Err(Error::UnderflowMove {
                count,
                stack,
                depth: walked,
            }),
        }
    }

    /// Unlinks the top crate of `stack`.
    pub(crate) fn pop(&mut self, stack: usize) -> Option<CrateId> {
        let head = self.heads[stack]?;
        self.heads[stack] = self.arena.below(head);
        self.arena.set_below(head, None);
        Some(head)
    }

    /// Links `id` on top of `stack`.
    pub(crate) fn push(&mut self, stack: usize, id: CrateId) {
        self.arena.set_below(id, self.heads[stack]);
        self.heads[stack] = Some(id);
    }

    /// Moves the block whose lowest crate is `bottom` from the top of `from`
    /// onto the top of `to`, keeping its internal order.
    ///
    /// `bottom` must lie in `from`; only the two block boundaries are
    /// rewritten.
    pub(crate) fn splice_block(&mut self, from: usize, to: usize, bottom: CrateId) {
        let top = self.heads[from];
        self.heads[from] = self.arena.below(bottom);
        self.arena.set_below(bottom, self.heads[to]);
        self.heads[to] = top;
    }

    /// Creates a crate and hangs it below `tail` in `stack`, or makes it the
    /// head when `tail` is `None`. Used while reading a diagram top-down.
    pub(crate) fn append_below(
        &mut self,
        stack: usize,
        tail: Option<CrateId>,
        label: char,
    ) -> CrateId {
        let id = self.arena.alloc(label);
        match tail {
            Some(tail) => self.arena.set_below(tail, Some(id)),
            None => self.heads[stack] = Some(id),
        }
        id
    }
}

/// Renders the forest in the diagram format it was loaded from, label row
/// included, so that the output can be loaded again.
impl Display for StackForest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let columns = (0..self.num_stacks())
            .map(|stack| self.labels(stack).collect_vec())
            .collect_vec();
        let tallest = columns.iter().map(Vec::len).max().unwrap_or(0);

        for height in (0..tallest).rev() {
            let row = columns
                .iter()
                .map(|column| {
                    // `column` is top first, `height` counts from the bottom.
                    column
                        .len()
                        .checked_sub(height + 1)
                        .map_or_else(|| "   ".to_string(), |i| format!("[{}]", column[i]))
                })
                .join(" ");
            writeln!(f, "{row}")?;
        }

        let labels = (1..=self.num_stacks()).map(|n| format!("{n:^3}")).join(" ");
        writeln!(f, "{labels}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> StackForest {
        StackForest::from_columns(&["NZ", "DCM", "P"])
    }

    #[test]
    fn test_from_columns_builds_top_first() {
        let forest = canonical();

        assert_eq!(forest.num_stacks(), 3);
        assert_eq!(forest.num_crates(), 6);
        assert_eq!(forest.column(1), "DCM");
        assert_eq!(forest.tops(), vec![Some('N'), Some('D'), Some('P')]);
        assert_eq!(forest.depth(1), 3);
        assert_eq!(forest.depth(7), 0);
    }

    #[test]
    fn test_pop_and_push_relink() {
        let mut forest = canonical();
        let id = forest.pop(1).unwrap();
        forest.push(2, id);

        assert_eq!(forest.column(1), "CM");
        assert_eq!(forest.column(2), "DP");
        assert_eq!(forest.num_crates(), 6);
    }

    #[test]
    fn test_pop_empty_stack() {
        let mut forest = StackForest::with_stacks(2);
        assert_eq!(forest.pop(0), None);
        assert_eq!(forest.top(0), None);
    }

    #[test]
    fn test_nth_from_top_reports_depth_on_underflow() {
        let forest = canonical();
        let id = forest.nth_from_top(1, 2).unwrap();
        assert_eq!(forest.arena().label(id), 'C');

        assert_eq!(
            forest.nth_from_top(0, 3),
            Err(Error::UnderflowMove {
                count: 3,
                stack: 0,
                depth: 2
            })
        );
    }

    #[test]
    fn test_splice_block_keeps_order() {
        let mut forest = canonical();
        let bottom = forest.nth_from_top(1, 2).unwrap();
        forest.splice_block(1, 0, bottom);

        assert_eq!(forest.column(0), "DCNZ");
        assert_eq!(forest.column(1), "M");
    }

    #[test]
    fn test_check_stack() {
        let forest = canonical();
        assert!(forest.check_stack(2).is_ok());
        assert_eq!(
            forest.check_stack(3),
            Err(Error::UnknownStack { stack: 3, stacks: 3 })
        );
    }

    #[test]
    fn test_display_renders_diagram() {
        let rendered = canonical().to_string();
        let expected = "    [D]    \n\
                        [N] [C]    \n\
                        [Z] [M] [P]\n \
                        1   2   3 \n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_display_of_empty_forest_is_label_row() {
        let forest = StackForest::with_stacks(2);
        assert_eq!(forest.to_string(), " 1   2 \n");
    }
}
