#![warn(missing_docs)]
//! This crate solves the supply-stacks puzzle: a fixed-width diagram of crate
//! stacks is loaded, a list of move directives is replayed against it and the
//! top crate of every stack is reported.

/// The `stacks` module implements the rearrangement engine: diagram loading,
/// directive parsing, the sequential and batched move policies and reporting.
pub mod stacks;
