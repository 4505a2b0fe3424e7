#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Loader for the fixed-width crate diagram.
//!
//! The diagram is laid out in groups of four bytes per stack, `[X] ` for a
//! crate and four spaces for a gap, except for the last column which has no
//! trailing space. The number of stacks therefore follows from the length `L`
//! of the first line: `N = (L + 1) / 4`.
//!
//! Rows are read top to bottom. The first crate met in a column becomes the
//! head of that stack and every later crate is hung below the previous one,
//! so each column keeps a tail ("builder") id next to its head while loading.
//!
//! The diagram ends at the first blank line. A row of stack labels
//! (` 1   2   3 `) may precede it and is skipped.

use crate::stacks::arena::CrateId;
use crate::stacks::error::{DiagramFault, Error, Result};
use crate::stacks::forest::StackForest;
use tracing::{debug, info};

/// Result of loading a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStacks {
    /// The initial stacks.
    pub forest: StackForest,
    /// Byte offset of the first line after the diagram block.
    pub offset: usize,
    /// Number of lines consumed by the diagram block, label row and blank
    /// line included.
    pub lines: usize,
}

/// Parses the diagram at the start of `input`.
///
/// # Errors
///
/// `MalformedDiagram` if the input has no line break, if the first line is
/// too short to hold a column, if a group is neither `[X]` nor blank, if a
/// row carries a crate beyond the column count of the first line, or if the
/// label row is not followed by a blank line.
pub fn load_stacks(input: &str) -> Result<LoadedStacks> {
    let Some(first_break) = input.find('\n') else {
        return Err(malformed(1, 1, DiagramFault::MissingLineBreak));
    };

    let width = strip_terminator(&input[..=first_break]).len();
    let columns = (width + 1) / 4;
    if columns == 0 {
        return Err(malformed(1, 1, DiagramFault::NoColumns));
    }

    let mut forest = StackForest::with_stacks(columns);
    let mut builders: Vec<Option<CrateId>> = vec![None; columns];
    let mut labels_seen = false;
    let mut offset = 0;
    let mut lines = 0;

    for (index, raw) in input.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let line = strip_terminator(raw);
        offset += raw.len();
        lines = line_no;

        if line.trim().is_empty() {
            break;
        }

        if labels_seen {
            return Err(malformed(line_no, 1, DiagramFault::MissingSeparatorLine));
        }

        if is_label_row(line) {
            debug!(line = line_no, "skipping stack label row");
            labels_seen = true;
            continue;
        }

        read_row(line, line_no, &mut forest, &mut builders)?;
    }

    info!(
        stacks = forest.num_stacks(),
        crates = forest.num_crates(),
        offset,
        "loaded crate diagram"
    );

    Ok(LoadedStacks {
        forest,
        offset,
        lines,
    })
}

fn read_row(
    line: &str,
    line_no: usize,
    forest: &mut StackForest,
    builders: &mut [Option<CrateId>],
) -> Result<()> {
    for (column, group) in line.as_bytes().chunks(4).enumerate() {
        let start = column * 4 + 1;
        let (cell, separator) = group.split_at(group.len().min(3));

        match cell {
            [b'[', label, b']'] => {
                if column >= builders.len() {
                    return Err(malformed(
                        line_no,
                        start,
                        DiagramFault::TooManyColumns {
                            columns: builders.len(),
                        },
                    ));
                }
                if !label.is_ascii_graphic() {
                    return Err(malformed(
                        line_no,
                        start + 1,
                        DiagramFault::BadLabel {
                            found: char::from(*label),
                        },
                    ));
                }
                builders[column] =
                    Some(forest.append_below(column, builders[column], char::from(*label)));
            }
            blank if blank.iter().all(|&b| b == b' ') => {}
            other => {
                return Err(malformed(
                    line_no,
                    start,
                    DiagramFault::BadGroup {
                        found: String::from_utf8_lossy(other).into_owned(),
                    },
                ));
            }
        }

        if let [sep] = separator {
            if *sep != b' ' {
                return Err(malformed(
                    line_no,
                    start + 3,
                    DiagramFault::BadSeparator {
                        found: char::from(*sep),
                    },
                ));
            }
        }
    }
    Ok(())
}

fn is_label_row(line: &str) -> bool {
    line.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

fn strip_terminator(raw: &str) -> &str {
    raw.trim_end_matches(['\n', '\r'])
}

fn malformed(line: usize, column: usize, fault: DiagramFault) -> Error {
    Error::MalformedDiagram {
        line,
        column,
        fault,
    }
}
