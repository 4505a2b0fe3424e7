#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Rearrangement policies.
//!
//! A policy decides how the crates named by an [`Instruction`] travel from
//! one stack to another. Two policies exist:
//! - `Sequential`: crates are moved one at a time, so the relocated block
//!   arrives in reverse order.
//! - `Batched`: the block is lifted as a unit and keeps its order.
//!
//! Both policies validate the instruction before touching any link, so a
//! failed instruction leaves the forest exactly as it was. Both relink crates
//! in place and never copy a label.

use crate::stacks::arena::CrateId;
use crate::stacks::error::Result;
use crate::stacks::forest::StackForest;
use crate::stacks::instruction::Instruction;
use clap::ValueEnum;
use std::fmt::{Debug, Display, Formatter};
use tracing::trace;

/// Interface shared by the rearrangement policies.
pub trait RearrangementPolicy: Debug + Clone + Default {
    /// Human readable name, used in logs and reports.
    const NAME: &'static str;

    /// Applies `instruction` to `forest`.
    ///
    /// Returns the number of crates that changed stacks, zero for a no-op.
    ///
    /// # Errors
    ///
    /// `UnknownStack` if either index is out of range and `UnderflowMove` if
    /// the source holds fewer than `count` crates. In both cases the forest
    /// is left untouched.
    fn apply(&self, forest: &mut StackForest, instruction: Instruction) -> Result<usize>;
}

/// Checks an instruction against the forest.
///
/// Returns the lowest crate of the block to move, or `None` when the
/// instruction is valid but moves nothing.
fn validate(forest: &StackForest, instruction: Instruction) -> Result<Option<CrateId>> {
    forest.check_stack(instruction.from)?;
    forest.check_stack(instruction.to)?;

    if instruction.count == 0 {
        return Ok(None);
    }
    let bottom = forest.nth_from_top(instruction.from, instruction.count)?;

    Ok((instruction.from != instruction.to).then_some(bottom))
}

/// Moves crates one at a time; the moved block arrives reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sequential;

impl RearrangementPolicy for Sequential {
    const NAME: &'static str = "sequential";

    fn apply(&self, forest: &mut StackForest, instruction: Instruction) -> Result<usize> {
        if validate(forest, instruction)?.is_none() {
            return Ok(0);
        }

        // `validate` proved the source holds at least `count` crates.
        let mut moved = 0;
        while moved < instruction.count {
            let Some(id) = forest.pop(instruction.from) else {
                break;
            };
            trace!(crate_id = id.index(), to = instruction.to, "relinking crate");
            forest.push(instruction.to, id);
            moved += 1;
        }
        debug_assert_eq!(moved, instruction.count);

        Ok(moved)
    }
}

/// Moves the top `count` crates as one block; their order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Batched;

impl RearrangementPolicy for Batched {
    const NAME: &'static str = "batched";

    fn apply(&self, forest: &mut StackForest, instruction: Instruction) -> Result<usize> {
        let Some(bottom) = validate(forest, instruction)? else {
            return Ok(0);
        };
        trace!(bottom = bottom.index(), to = instruction.to, "splicing block");
        forest.splice_block(instruction.from, instruction.to, bottom);

        Ok(instruction.count)
    }
}

/// Runtime selection of a rearrangement policy.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum PolicyType {
    /// One crate at a time (part one).
    #[default]
    Sequential,
    /// Whole block at once (part two).
    Batched,
}

impl Display for PolicyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "{}", Sequential::NAME),
            Self::Batched => write!(f, "{}", Batched::NAME),
        }
    }
}

impl PolicyType {
    /// Applies `instruction` with the selected policy.
    ///
    /// # Errors
    ///
    /// See [`RearrangementPolicy::apply`].
    pub fn apply(self, forest: &mut StackForest, instruction: Instruction) -> Result<usize> {
        match self {
            Self::Sequential => Sequential.apply(forest, instruction),
            Self::Batched => Batched.apply(forest, instruction),
        }
    }

    /// Puzzle part this policy answers.
    #[must_use]
    pub const fn part(self) -> u8 {
        match self {
            Self::Sequential => 1,
            Self::Batched => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::error::Error;

    fn forest() -> StackForest {
        StackForest::from_columns(&["ABC", "XY", ""])
    }

    #[test]
    fn test_sequential_reverses_block() {
        let mut forest = forest();
        let moved = Sequential.apply(&mut forest, Instruction::new(3, 0, 1)).unwrap();

        assert_eq!(moved, 3);
        assert_eq!(forest.column(0), "");
        assert_eq!(forest.column(1), "CBAXY");
    }

    #[test]
    fn test_batched_preserves_block() {
        let mut forest = forest();
        let moved = Batched.apply(&mut forest, Instruction::new(2, 0, 1)).unwrap();

        assert_eq!(moved, 2);
        assert_eq!(forest.column(0), "C");
        assert_eq!(forest.column(1), "ABXY");
    }

    #[test]
    fn test_move_onto_empty_stack() {
        let mut sequential = forest();
        Sequential
            .apply(&mut sequential, Instruction::new(2, 1, 2))
            .unwrap();
        assert_eq!(sequential.column(2), "YX");

        let mut batched = forest();
        Batched.apply(&mut batched, Instruction::new(2, 1, 2)).unwrap();
        assert_eq!(batched.column(2), "XY");
        assert_eq!(batched.column(1), "");
    }

    #[test]
    fn test_single_crate_moves_agree() {
        for (from, to) in [(0, 1), (1, 0), (0, 2), (1, 2)] {
            let mut sequential = forest();
            let mut batched = forest();
            Sequential
                .apply(&mut sequential, Instruction::new(1, from, to))
                .unwrap();
            Batched
                .apply(&mut batched, Instruction::new(1, from, to))
                .unwrap();
            assert_eq!(sequential, batched);
        }
    }

    #[test]
    fn test_batched_round_trip_restores_stacks() {
        let original = forest();
        let mut forest = original.clone();
        Batched.apply(&mut forest, Instruction::new(2, 0, 1)).unwrap();
        Batched.apply(&mut forest, Instruction::new(2, 1, 0)).unwrap();

        assert_eq!(forest.column(0), original.column(0));
        assert_eq!(forest.column(1), original.column(1));
    }

    #[test]
    fn test_zero_count_is_noop() {
        for policy in [PolicyType::Sequential, PolicyType::Batched] {
            let mut forest = forest();
            let moved = policy.apply(&mut forest, Instruction::new(0, 0, 1)).unwrap();
            assert_eq!(moved, 0);
            assert_eq!(forest, self::forest());
        }
    }

    #[test]
    fn test_same_stack_is_noop() {
        for policy in [PolicyType::Sequential, PolicyType::Batched] {
            let mut forest = forest();
            let moved = policy.apply(&mut forest, Instruction::new(2, 0, 0)).unwrap();
            assert_eq!(moved, 0);
            assert_eq!(forest.column(0), "ABC");
        }
    }

    #[test]
    fn test_underflow_leaves_forest_untouched() {
        for policy in [PolicyType::Sequential, PolicyType::Batched] {
            let mut forest = forest();
            let err = policy
                .apply(&mut forest, Instruction::new(3, 1, 0))
                .unwrap_err();
            assert_eq!(
                err,
                Error::UnderflowMove {
                    count: 3,
                    stack: 1,
                    depth: 2
                }
            );
            assert_eq!(forest, self::forest());
        }
    }

    #[test]
    fn test_validate_finds_block_bottom() {
        let forest = forest();
        let bottom = validate(&forest, Instruction::new(2, 0, 1)).unwrap();
        assert_eq!(bottom.map(|id| forest.arena().label(id)), Some('B'));

        assert_eq!(validate(&forest, Instruction::new(2, 0, 0)), Ok(None));
        assert_eq!(validate(&forest, Instruction::new(0, 0, 1)), Ok(None));
    }

    #[test]
    fn test_sequential_drains_whole_stack() {
        let mut forest = forest();
        let moved = Sequential.apply(&mut forest, Instruction::new(2, 1, 0)).unwrap();

        assert_eq!(moved, 2);
        assert_eq!(forest.column(1), "");
        assert_eq!(forest.column(0), "YXABC");
        assert_eq!(forest.num_crates(), 6);
    }

    #[test]
    fn test_unknown_stack() {
        let mut forest = forest();
        assert_eq!(
            Batched.apply(&mut forest, Instruction::new(1, 0, 5)),
            Err(Error::UnknownStack { stack: 5, stacks: 3 })
        );
    }

    #[test]
    fn test_policy_type_display_and_part() {
        assert_eq!(PolicyType::Sequential.to_string(), "sequential");
        assert_eq!(PolicyType::Batched.part(), 2);
    }
}
