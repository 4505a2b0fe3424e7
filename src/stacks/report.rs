#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Snapshot of the stack tops once every instruction has been applied.

use crate::stacks::error::{Error, Result};
use crate::stacks::forest::StackForest;

/// Concatenates the top crate of every stack in index order.
///
/// # Errors
///
/// `EmptyStack` for the first stack that has no crate left.
pub fn snapshot(forest: &StackForest) -> Result<String> {
    forest
        .tops()
        .into_iter()
        .enumerate()
        .map(|(stack, top)| top.ok_or(Error::EmptyStack { stack }))
        .collect()
}
