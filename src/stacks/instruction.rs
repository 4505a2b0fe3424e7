#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reader for move directives.
//!
//! A directive has the fixed form `move <count> from <from> to <to>` with
//! 1-based stack numbers. The line is first split into typed [`Token`]s and
//! then checked against the grammar left to right. Stack numbers are turned
//! into 0-based indices on the way out.

use crate::stacks::error::{Error, InstructionFault, Result};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::CharIndices;

type FaultResult<T> = std::result::Result<T, InstructionFault>;

/// A parsed move request. Stack indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Number of crates to relocate.
    pub count: usize,
    /// Source stack.
    pub from: usize,
    /// Destination stack.
    pub to: usize,
}

impl Instruction {
    /// Builds an instruction from 0-based stack indices.
    #[must_use]
    pub const fn new(count: usize, from: usize, to: usize) -> Self {
        Self { count, from, to }
    }
}

/// Renders the instruction back in directive form, 1-based.
impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "move {} from {} to {}",
            self.count,
            self.from + 1,
            self.to + 1
        )
    }
}

/// The literal words of the directive grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `move`
    Move,
    /// `from`
    From,
    /// `to`
    To,
}

impl Keyword {
    fn lookup(word: &str) -> Option<Self> {
        match word {
            "move" => Some(Self::Move),
            "from" => Some(Self::From),
            "to" => Some(Self::To),
            _ => None,
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move => write!(f, "`move`"),
            Self::From => write!(f, "`from`"),
            Self::To => write!(f, "`to`"),
        }
    }
}

/// One lexical unit of a directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// A decimal number.
    Number(usize),
    /// One of the grammar's literal words.
    Keyword(Keyword),
    /// A run of whitespace.
    Separator,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Keyword(k) => write!(f, "keyword {k}"),
            Self::Separator => write!(f, "whitespace"),
        }
    }
}

/// A well-formed directive has exactly eleven tokens.
pub type Tokens = SmallVec<[Token; 11]>;

/// Splits a directive line into tokens.
///
/// # Errors
///
/// Returns the fault for the first character or word that is not part of the
/// directive vocabulary, or for a number that does not fit in `usize`.
pub fn tokenize(line: &str) -> FaultResult<Tokens> {
    let mut tokens = Tokens::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = if c.is_whitespace() {
            take_while(&mut chars, char::is_whitespace);
            Token::Separator
        } else if c.is_ascii_digit() {
            let end = take_while(&mut chars, |c| c.is_ascii_digit()).unwrap_or(line.len());
            let digits = &line[start..end];
            let value = digits
                .parse::<usize>()
                .map_err(|_| InstructionFault::NumberOverflow {
                    digits: digits.to_string(),
                })?;
            Token::Number(value)
        } else if c.is_alphabetic() {
            let end = take_while(&mut chars, char::is_alphabetic).unwrap_or(line.len());
            let word = &line[start..end];
            let keyword = Keyword::lookup(word).ok_or_else(|| InstructionFault::UnknownWord {
                found: word.to_string(),
            })?;
            Token::Keyword(keyword)
        } else {
            return Err(InstructionFault::UnexpectedCharacter { found: c });
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Consumes characters while `pred` holds and returns the byte offset of the
/// first character that does not match, `None` at end of input.
fn take_while(
    chars: &mut Peekable<CharIndices<'_>>,
    pred: impl Fn(char) -> bool,
) -> Option<usize> {
    while let Some(&(index, c)) = chars.peek() {
        if !pred(c) {
            return Some(index);
        }
        chars.next();
    }
    None
}

/// Forward parser over a token sequence.
struct Parser<I: Iterator<Item = Token>> {
    tokens: I,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    fn next_or_end(&mut self, expected: &'static str) -> FaultResult<Token> {
        self.tokens.next().ok_or_else(|| InstructionFault::Unexpected {
            expected,
            found: "end of line".to_string(),
        })
    }

    fn keyword(&mut self, keyword: Keyword, expected: &'static str) -> FaultResult<()> {
        match self.next_or_end(expected)? {
            Token::Keyword(k) if k == keyword => Ok(()),
            other => Err(unexpected(expected, other)),
        }
    }

    fn separator(&mut self) -> FaultResult<()> {
        match self.next_or_end("whitespace")? {
            Token::Separator => Ok(()),
            other => Err(unexpected("whitespace", other)),
        }
    }

    fn number(&mut self, expected: &'static str) -> FaultResult<usize> {
        match self.next_or_end(expected)? {
            Token::Number(n) => Ok(n),
            other => Err(unexpected(expected, other)),
        }
    }

    fn stack(&mut self, expected: &'static str) -> FaultResult<usize> {
        self.number(expected)?
            .checked_sub(1)
            .ok_or(InstructionFault::ZeroStack)
    }

    fn finish(mut self) -> FaultResult<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(other) => Err(unexpected("end of line", other)),
        }
    }
}

fn unexpected(expected: &'static str, found: Token) -> InstructionFault {
    InstructionFault::Unexpected {
        expected,
        found: found.to_string(),
    }
}

/// Parses a directive line without line context.
///
/// Trailing whitespace (including a `\r` left over from CRLF input) is
/// ignored; anything else outside the grammar is rejected.
///
/// # Errors
///
/// The [`InstructionFault`] describing the first mismatch.
pub fn parse_instruction(line: &str) -> FaultResult<Instruction> {
    let tokens = tokenize(line.trim_end())?;
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };

    parser.keyword(Keyword::Move, "keyword `move`")?;
    parser.separator()?;
    let count = parser.number("crate count")?;
    parser.separator()?;
    parser.keyword(Keyword::From, "keyword `from`")?;
    parser.separator()?;
    let from = parser.stack("source stack number")?;
    parser.separator()?;
    parser.keyword(Keyword::To, "keyword `to`")?;
    parser.separator()?;
    let to = parser.stack("destination stack number")?;
    parser.finish()?;

    Ok(Instruction { count, from, to })
}

/// Parses the directive found on line `line_no` of the input.
///
/// # Errors
///
/// `MalformedInstruction` carrying the line number and text.
pub fn read_instruction(line: &str, line_no: usize) -> Result<Instruction> {
    parse_instruction(line).map_err(|fault| Error::MalformedInstruction {
        line: line_no,
        text: line.trim_end().to_string(),
        fault,
    })
}
