// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parse errors for path data and transform attributes.

use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// An error which can be returned when parsing path data or a transform attribute.
///
/// Besides the [kind](ErrorKind) of failure, it records the byte offset in
/// the source text where the problem was found and, for path data, the
/// command letter that was being interpreted.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind} at offset {position}{}", command_suffix(.command))]
pub struct ParseError {
    kind: ErrorKind,
    position: usize,
    command: Option<char>,
}

/// The reason a parse failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The source text contained a malformed literal or an unexpected character.
    #[error("malformed input: {0}")]
    Tokenize(&'static str),
    /// A number was required, but the token could not be read as one.
    #[error("expected a number, found {0}")]
    NumberFormat(String),
    /// A command needs more operands than the input provides.
    #[error("missing operand")]
    MissingOperand,
    /// A letter outside of the path command alphabet.
    #[error("unknown command {0:?}")]
    UnknownCommand(char),
    /// A transform argument list is missing a parenthesis.
    #[error("missing {0} parenthesis")]
    UnbalancedDelimiter(Delimiter),
    /// A token that fits nowhere in the grammar.
    #[error("unexpected {0}")]
    UnexpectedToken(String),
    /// A transform function name that is not recognized.
    #[error("unknown transform function {0:?}")]
    UnknownTransform(String),
    /// A transform function received the wrong number of arguments.
    #[error("`{op}` takes {expected} arguments, found {found}")]
    ArgumentCount {
        /// The transform function name.
        op: &'static str,
        /// A description of the accepted argument counts.
        expected: &'static str,
        /// The number of arguments that were given.
        found: usize,
    },
    /// The transform attribute did not contain any transform function.
    #[error("no transform found")]
    NoTransform,
}

/// Which side of a parenthesized argument list is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// The `(` before the arguments.
    Open,
    /// The `)` after the arguments.
    Close,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, position: usize) -> Self {
        ParseError {
            kind,
            position,
            command: None,
        }
    }

    /// Attach the command letter in effect when the error happened.
    pub(crate) fn in_command(mut self, command: char) -> Self {
        self.command.get_or_insert(command);
        self
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset into the source text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The path command being interpreted, if any.
    pub fn command(&self) -> Option<char> {
        self.command
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Open => write!(f, "opening"),
            Delimiter::Close => write!(f, "closing"),
        }
    }
}

struct CommandSuffix(Option<char>);

fn command_suffix(command: &Option<char>) -> CommandSuffix {
    CommandSuffix(*command)
}

impl fmt::Display for CommandSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, " in command '{c}'"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = ParseError::new(ErrorKind::MissingOperand, 3).in_command('M');
        assert_eq!(err.to_string(), "missing operand at offset 3 in command 'M'");

        let err = ParseError::new(ErrorKind::UnbalancedDelimiter(Delimiter::Close), 17);
        assert_eq!(err.to_string(), "missing closing parenthesis at offset 17");

        let err = ParseError::new(
            ErrorKind::ArgumentCount {
                op: "rotate",
                expected: "1 or 3",
                found: 2,
            },
            0,
        );
        assert_eq!(
            err.to_string(),
            "`rotate` takes 1 or 3 arguments, found 2 at offset 0"
        );
    }

    #[test]
    fn first_command_wins() {
        let err = ParseError::new(ErrorKind::MissingOperand, 0)
            .in_command('C')
            .in_command('L');
        assert_eq!(err.command(), Some('C'));
    }
}
