#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Load → replay → report pipeline.
//!
//! The diagram is loaded once, every directive after it is parsed and applied
//! in input order, and the tops of the final stacks are reported. The first
//! failure aborts the run and is returned as is.

use crate::stacks::diagram::load_stacks;
use crate::stacks::error::Result;
use crate::stacks::forest::StackForest;
use crate::stacks::instruction::{read_instruction, Instruction};
use crate::stacks::policy::{Batched, PolicyType, RearrangementPolicy, Sequential};
use crate::stacks::report::snapshot;
use tracing::{debug, info};

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Stacks in the diagram.
    pub stacks: usize,
    /// Crates in the diagram.
    pub crates: usize,
    /// Directives applied.
    pub instructions: usize,
    /// Crates that changed stacks, summed over all directives.
    pub crates_moved: usize,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Top crate of every stack, in index order.
    pub tops: String,
    /// The stacks after the last directive.
    pub forest: StackForest,
    /// Run counters.
    pub stats: RunStats,
}

/// Parses the directives in `text`, numbering lines from `first_line`.
/// Blank lines are skipped.
pub fn read_instructions(
    text: &str,
    first_line: usize,
) -> impl Iterator<Item = Result<Instruction>> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(index, line)| read_instruction(line, first_line + index))
}

fn replay(
    input: &str,
    mut apply: impl FnMut(&mut StackForest, Instruction) -> Result<usize>,
) -> Result<Outcome> {
    let loaded = load_stacks(input)?;
    let mut forest = loaded.forest;
    let mut stats = RunStats {
        stacks: forest.num_stacks(),
        crates: forest.num_crates(),
        ..RunStats::default()
    };

    for instruction in read_instructions(&input[loaded.offset..], loaded.lines + 1) {
        let instruction = instruction?;
        debug!(%instruction, "applying");
        stats.crates_moved += apply(&mut forest, instruction)?;
        stats.instructions += 1;
    }

    let tops = snapshot(&forest)?;
    info!(
        instructions = stats.instructions,
        crates_moved = stats.crates_moved,
        %tops,
        "rearrangement finished"
    );

    Ok(Outcome {
        tops,
        forest,
        stats,
    })
}

/// Runs the whole pipeline with a statically chosen policy.
///
/// # Errors
///
/// The first loader, reader, executor or reporter error.
pub fn rearrange<P: RearrangementPolicy>(input: &str, policy: &P) -> Result<Outcome> {
    debug!(policy = P::NAME, "starting rearrangement");
    replay(input, |forest, instruction| policy.apply(forest, instruction))
}

/// Runs the whole pipeline with a policy chosen at runtime.
///
/// # Errors
///
/// The first loader, reader, executor or reporter error.
pub fn rearrange_with(input: &str, policy: PolicyType) -> Result<Outcome> {
    debug!(%policy, "starting rearrangement");
    replay(input, |forest, instruction| policy.apply(forest, instruction))
}

/// Tops after replaying `input` one crate at a time.
///
/// # Errors
///
/// See [`rearrange`].
pub fn part_one(input: &str) -> Result<String> {
    rearrange(input, &Sequential).map(|outcome| outcome.tops)
}

/// Tops after replaying `input` one block at a time.
///
/// # Errors
///
/// See [`rearrange`].
pub fn part_two(input: &str) -> Result<String> {
    rearrange(input, &Batched).map(|outcome| outcome.tops)
}
