// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numbers and coordinate pairs.
//!
//! Operands are separated by `wsp* comma? wsp*`. A comma promises another
//! operand, so a trailing comma is an error.

use alloc::string::ToString;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{ErrorKind, ParseError, Point};

/// Convert a number token to `f64`.
///
/// # Errors
///
/// Any token other than a number, and any literal outside the range of
/// `f64` (such as `1e400`), fails with [`ErrorKind::NumberFormat`]. An
/// error token fails with [`ErrorKind::Tokenize`].
pub fn parse_number(token: Token<'_>) -> Result<f64, ParseError> {
    match token.kind {
        TokenKind::Number(text) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::new(
                ErrorKind::NumberFormat(text.to_string()),
                token.offset,
            )),
        },
        TokenKind::Error(msg) => Err(ParseError::new(ErrorKind::Tokenize(msg), token.offset)),
        other => Err(ParseError::new(
            ErrorKind::NumberFormat(other.to_string()),
            token.offset,
        )),
    }
}

/// Consume the next number, skipping leading whitespace.
///
/// Running into a command letter, a closing parenthesis or the end of the
/// input is reported as [`ErrorKind::MissingOperand`].
pub(crate) fn expect_number(lexer: &mut Lexer<'_>) -> Result<f64, ParseError> {
    lexer.skip_whitespace();
    let token = lexer.peek();
    match token.kind {
        TokenKind::Number(_) | TokenKind::Error(_) => parse_number(lexer.next_token()),
        TokenKind::Letter(_) | TokenKind::CloseParen | TokenKind::EndOfStream => {
            Err(ParseError::new(ErrorKind::MissingOperand, token.offset))
        }
        _ => parse_number(token),
    }
}

/// Parse a coordinate pair.
///
/// # Errors
///
/// [`ErrorKind::MissingOperand`] if either number is absent.
pub fn parse_tuple(lexer: &mut Lexer<'_>) -> Result<Point, ParseError> {
    let x = expect_number(lexer)?;
    lexer.skip_separator();
    let y = expect_number(lexer)?;
    Ok(Point::new(x, y))
}

/// Skip the separator after an operand and report whether another operand follows.
pub(crate) fn more_operands(lexer: &mut Lexer<'_>) -> Result<bool, ParseError> {
    if lexer.skip_separator() {
        // After a comma, the next operand is mandatory.
        let token = lexer.peek();
        match token.kind {
            TokenKind::Number(_) => Ok(true),
            _ => expect_number(lexer).map(|_| true),
        }
    } else {
        Ok(matches!(lexer.peek().kind, TokenKind::Number(_)))
    }
}

/// Greedily parse numbers for as long as they are available.
///
/// # Errors
///
/// Fails if a comma is not followed by a number.
pub fn parse_number_list(lexer: &mut Lexer<'_>) -> Result<SmallVec<[f64; 6]>, ParseError> {
    let mut numbers = SmallVec::new();
    lexer.skip_whitespace();
    if !matches!(lexer.peek().kind, TokenKind::Number(_)) {
        return Ok(numbers);
    }
    loop {
        numbers.push(expect_number(lexer)?);
        if !more_operands(lexer)? {
            return Ok(numbers);
        }
    }
}

/// Greedily parse coordinate pairs for as long as they are available.
///
/// # Errors
///
/// Fails on a dangling comma or an unpaired number.
pub fn parse_tuple_list(lexer: &mut Lexer<'_>) -> Result<Vec<Point>, ParseError> {
    let mut tuples = Vec::new();
    lexer.skip_whitespace();
    if !matches!(lexer.peek().kind, TokenKind::Number(_)) {
        return Ok(tuples);
    }
    loop {
        tuples.push(parse_tuple(lexer)?);
        if !more_operands(lexer)? {
            return Ok(tuples);
        }
    }
}
