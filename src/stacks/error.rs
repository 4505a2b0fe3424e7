#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error taxonomy for the rearrangement engine.
//!
//! Every failure is fatal for a run: the loader, the instruction reader, the
//! executor and the reporter all return [`Error`] and the driver propagates it
//! unchanged. Stack indices are stored 0-based and rendered 1-based, matching
//! the numbering used in the puzzle text.

use thiserror::Error;

/// Convenience alias used throughout the `stacks` module.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, replaying or reporting a rearrangement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A diagram line does not match the expected bracket/space grid.
    #[error("malformed diagram at line {line}, column {column}: {fault}")]
    MalformedDiagram {
        /// 1-based line number within the input.
        line: usize,
        /// 1-based byte column within the line.
        column: usize,
        /// What was wrong with the line.
        fault: DiagramFault,
    },

    /// A directive line does not match `move <count> from <from> to <to>`.
    #[error("malformed instruction at line {line} ({text:?}): {fault}")]
    MalformedInstruction {
        /// 1-based line number within the input.
        line: usize,
        /// The offending line, without its terminator.
        text: String,
        /// What was wrong with the line.
        fault: InstructionFault,
    },

    /// An instruction names a stack that the diagram does not contain.
    #[error("stack {} does not exist, the diagram has {stacks} stacks", .stack + 1)]
    UnknownStack {
        /// 0-based index of the missing stack.
        stack: usize,
        /// Number of stacks in the forest.
        stacks: usize,
    },

    /// An instruction asks for more crates than the source stack holds.
    #[error("cannot move {count} crates from stack {}, it holds only {depth}", .stack + 1)]
    UnderflowMove {
        /// Number of crates requested.
        count: usize,
        /// 0-based index of the source stack.
        stack: usize,
        /// Number of crates the source stack actually holds.
        depth: usize,
    },

    /// A stack has no top crate when the snapshot is taken.
    #[error("stack {} is empty, it has no top crate to report", .stack + 1)]
    EmptyStack {
        /// 0-based index of the empty stack.
        stack: usize,
    },
}

/// Reasons a diagram line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramFault {
    /// The input has no line break, so no diagram row can be delimited.
    #[error("input has no line break")]
    MissingLineBreak,
    /// The first line is too short to hold a single column.
    #[error("first line is too short to hold a column")]
    NoColumns,
    /// A group is neither `[X]` nor three spaces.
    #[error("expected `[X]` or three spaces, found {found:?}")]
    BadGroup {
        /// The text of the rejected group.
        found: String,
    },
    /// Two groups are not separated by a single space.
    #[error("expected a space between columns, found {found:?}")]
    BadSeparator {
        /// The character found where the separator should be.
        found: char,
    },
    /// A crate label is not a printable ASCII character.
    #[error("crate label {found:?} is not printable ASCII")]
    BadLabel {
        /// The rejected label byte, as a character.
        found: char,
    },
    /// A row holds more columns than the first line announced.
    #[error("row is wider than the {columns} columns of the first line")]
    TooManyColumns {
        /// Column count derived from the first line.
        columns: usize,
    },
    /// The label row is not followed by a blank line.
    #[error("expected a blank line after the stack labels")]
    MissingSeparatorLine,
}

/// Reasons a directive line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionFault {
    /// A character that cannot start any token.
    #[error("unexpected character {found:?}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
    },
    /// A word that is not one of `move`, `from` or `to`.
    #[error("unknown word {found:?}")]
    UnknownWord {
        /// The offending word.
        found: String,
    },
    /// A number too large to be represented.
    #[error("number {digits} is out of range")]
    NumberOverflow {
        /// The digits as written.
        digits: String,
    },
    /// A token other than the one the grammar requires at this point.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        /// Description of the required token.
        expected: &'static str,
        /// Description of the token actually found.
        found: String,
    },
    /// A stack number of zero, which has no 0-based equivalent.
    #[error("stack numbers start at 1, found 0")]
    ZeroStack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_numbers_render_one_based() {
        let err = Error::UnderflowMove {
            count: 4,
            stack: 0,
            depth: 2,
        };
        assert_eq!(
            err.to_string(),
            "cannot move 4 crates from stack 1, it holds only 2"
        );

        let err = Error::EmptyStack { stack: 2 };
        assert_eq!(err.to_string(), "stack 3 is empty, it has no top crate to report");
    }

    #[test]
    fn test_nested_fault_is_rendered() {
        let err = Error::MalformedInstruction {
            line: 6,
            text: "move x".to_string(),
            fault: InstructionFault::UnexpectedCharacter { found: 'x' },
        };
        assert_eq!(
            err.to_string(),
            "malformed instruction at line 6 (\"move x\"): unexpected character 'x'"
        );
    }
}
