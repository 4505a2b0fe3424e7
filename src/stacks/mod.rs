#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The crate-stack rearrangement engine.
//!
//! Bottom-up: [`arena`] owns the crates, [`forest`] links them into stacks,
//! [`diagram`] loads the initial stacks, [`instruction`] reads directives,
//! [`policy`] applies them, [`report`] reads the tops and [`driver`] ties the
//! pipeline together.
pub mod arena;
pub mod diagram;
pub mod driver;
pub mod error;
pub mod forest;
pub mod instruction;
pub mod policy;
pub mod report;

pub use driver::{part_one, part_two, rearrange, rearrange_with, Outcome, RunStats};
pub use error::{Error, Result};
pub use forest::StackForest;
pub use instruction::Instruction;
pub use policy::{Batched, PolicyType, RearrangementPolicy, Sequential};
