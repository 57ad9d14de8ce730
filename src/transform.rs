// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of transform attributes such as `translate(10 20) rotate(45)`.

use alloc::string::{String, ToString};

use crate::common::degrees;
use crate::lexer::{Lexer, TokenKind};
use crate::operand::parse_number_list;
use crate::{Affine, Delimiter, ErrorKind, ParseError};

/// A transform function, with the argument counts it accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransformOp {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

impl TransformOp {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "matrix" => TransformOp::Matrix,
            "translate" => TransformOp::Translate,
            "scale" => TransformOp::Scale,
            "rotate" => TransformOp::Rotate,
            "skewX" => TransformOp::SkewX,
            "skewY" => TransformOp::SkewY,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            TransformOp::Matrix => "matrix",
            TransformOp::Translate => "translate",
            TransformOp::Scale => "scale",
            TransformOp::Rotate => "rotate",
            TransformOp::SkewX => "skewX",
            TransformOp::SkewY => "skewY",
        }
    }

    fn expected(self) -> &'static str {
        match self {
            TransformOp::Matrix => "6",
            TransformOp::Translate | TransformOp::Scale => "1 or 2",
            TransformOp::Rotate => "1 or 3",
            TransformOp::SkewX | TransformOp::SkewY => "1",
        }
    }

    /// Build the transform, or `None` if the argument count is wrong.
    ///
    /// Angles are in degrees, as in the attribute syntax.
    fn build(self, args: &[f64]) -> Option<Affine> {
        Some(match (self, args) {
            (TransformOp::Matrix, &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
            (TransformOp::Translate, &[tx]) => Affine::translate((tx, 0.0)),
            (TransformOp::Translate, &[tx, ty]) => Affine::translate((tx, ty)),
            (TransformOp::Scale, &[s]) => Affine::scale(s),
            (TransformOp::Scale, &[sx, sy]) => Affine::scale_non_uniform(sx, sy),
            (TransformOp::Rotate, &[a]) => Affine::rotate(degrees(a)),
            (TransformOp::Rotate, &[a, cx, cy]) => Affine::rotate_about(degrees(a), (cx, cy)),
            (TransformOp::SkewX, &[a]) => Affine::skew_x(degrees(a)),
            (TransformOp::SkewY, &[a]) => Affine::skew_y(degrees(a)),
            _ => return None,
        })
    }
}

/// Parse a transform attribute into a single affine transform.
///
/// The list of transform functions is composed in the order it is written,
/// so `"translate(10) scale(2)"` scales first and then translates, the same
/// as `Affine::translate((10.0, 0.0)) * Affine::scale(2.0)`. Angles are given
/// in degrees.
///
/// # Errors
///
/// Fails on malformed syntax, unknown function names and wrong argument
/// counts. An empty or blank attribute is an error of kind
/// [`ErrorKind::NoTransform`].
///
/// ```
/// use pathstream::{parse_transform, Affine, Point};
///
/// let t = parse_transform("matrix(1,0,0,1,10,20)").unwrap();
/// assert_eq!(t, Affine::translate((10.0, 20.0)));
/// assert_eq!(t * Point::new(1.0, 1.0), Point::new(11.0, 21.0));
/// ```
pub fn parse_transform(src: &str) -> Result<Affine, ParseError> {
    let mut lexer = Lexer::words(src);
    let mut result: Option<Affine> = None;
    // Offset of a comma separating the previous function from the next one.
    let mut pending_comma: Option<usize> = None;
    loop {
        lexer.skip_whitespace();
        let token = lexer.next_token();
        match token.kind {
            TokenKind::EndOfStream => {
                if let Some(offset) = pending_comma {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedToken(TokenKind::Comma.to_string()),
                        offset,
                    ));
                }
                return result.ok_or_else(|| ParseError::new(ErrorKind::NoTransform, token.offset));
            }
            // At most one comma may separate two transform functions.
            TokenKind::Comma if result.is_some() && pending_comma.is_none() => {
                pending_comma = Some(token.offset);
            }
            TokenKind::Word(name) => {
                pending_comma = None;
                let Some(op) = TransformOp::from_name(name) else {
                    return Err(ParseError::new(
                        ErrorKind::UnknownTransform(String::from(name)),
                        token.offset,
                    ));
                };
                let args = parse_arguments(&mut lexer)?;
                let Some(t) = op.build(&args) else {
                    return Err(ParseError::new(
                        ErrorKind::ArgumentCount {
                            op: op.name(),
                            expected: op.expected(),
                            found: args.len(),
                        },
                        token.offset,
                    ));
                };
                result = Some(match result {
                    Some(acc) => acc * t,
                    None => t,
                });
            }
            TokenKind::Error(msg) => {
                return Err(ParseError::new(ErrorKind::Tokenize(msg), token.offset))
            }
            other => {
                return Err(ParseError::new(
                    ErrorKind::UnexpectedToken(other.to_string()),
                    token.offset,
                ))
            }
        }
    }
}

/// Parse a parenthesized argument list.
fn parse_arguments(lexer: &mut Lexer<'_>) -> Result<smallvec::SmallVec<[f64; 6]>, ParseError> {
    lexer.skip_whitespace();
    let open = lexer.next_token();
    if open.kind != TokenKind::OpenParen {
        return Err(ParseError::new(
            ErrorKind::UnbalancedDelimiter(Delimiter::Open),
            open.offset,
        ));
    }
    let args = parse_number_list(lexer)?;
    lexer.skip_whitespace();
    let close = lexer.next_token();
    let unclosed = || {
        ParseError::new(
            ErrorKind::UnbalancedDelimiter(Delimiter::Close),
            close.offset,
        )
    };
    match close.kind {
        TokenKind::CloseParen => Ok(args),
        TokenKind::EndOfStream | TokenKind::OpenParen => Err(unclosed()),
        TokenKind::Word(_) => {
            // A word followed by `(` is the next function, so this list was
            // never closed. Otherwise the word is a malformed argument.
            lexer.skip_whitespace();
            if lexer.peek().kind == TokenKind::OpenParen {
                Err(unclosed())
            } else {
                Err(ParseError::new(
                    ErrorKind::NumberFormat(close.kind.to_string()),
                    close.offset,
                ))
            }
        }
        TokenKind::Error(msg) => Err(ParseError::new(ErrorKind::Tokenize(msg), close.offset)),
        other => Err(ParseError::new(
            ErrorKind::NumberFormat(other.to_string()),
            close.offset,
        )),
    }
}
