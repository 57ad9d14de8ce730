// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path data interpreter.

use alloc::string::ToString;

use log::{debug, trace, warn};

use crate::lexer::{Lexer, TokenKind};
use crate::operand::{expect_number, more_operands, parse_tuple};
use crate::{
    Affine, CloseStyle, Command, ErrorKind, ParseError, ParseOptions, Point, UnknownCommandPolicy,
};

/// Interpret path data, applying `transform` to every emitted point.
///
/// This is shorthand for [`Commands::new`].
///
/// ```
/// use pathstream::{parse_path, Affine, Command};
///
/// let commands: Result<Vec<_>, _> = parse_path("M10,10 l5,5", Affine::IDENTITY).collect();
/// assert_eq!(
///     commands.unwrap(),
///     [Command::move_to((10.0, 10.0)), Command::line_to((15.0, 15.0))]
/// );
/// ```
pub fn parse_path(data: &str, transform: Affine) -> Commands<'_> {
    Commands::new(data, transform)
}

/// A lazy stream of the commands of one path.
///
/// Each call to [`next`](Iterator::next) reads just enough input to produce
/// one command, so commands can be consumed while the rest of the path data
/// is still unparsed. On malformed input the stream yields a single error
/// and then ends; commands yielded before it remain valid.
///
/// The pen position, subpath start and previous control points are all
/// tracked in the untransformed coordinates of the path data; only emitted
/// points go through the transform.
#[derive(Clone, Debug)]
pub struct Commands<'a> {
    lexer: Lexer<'a>,
    transform: Affine,
    options: ParseOptions,
    /// The end point of the previous segment.
    current_point: Point,
    /// The start point of the current subpath (this resets for every `MoveTo`).
    subpath_start: Point,
    /// If the previous segment was a cubic Bézier, its second control point.
    previous_cubic: Option<Point>,
    /// If the previous segment was a quadratic Bézier, its control point.
    previous_quad: Option<Point>,
    /// The command letter whose operands may repeat without restating it.
    active: Option<char>,
    /// Operands of a skipped unknown command are being discarded.
    skipping: bool,
    done: bool,
}

impl<'a> Commands<'a> {
    /// Interpret `data` with the default [`ParseOptions`].
    pub fn new(data: &'a str, transform: Affine) -> Self {
        Commands::with_options(data, transform, ParseOptions::default())
    }

    /// Interpret `data` with the given options.
    pub fn with_options(data: &'a str, transform: Affine, options: ParseOptions) -> Self {
        Commands {
            lexer: Lexer::new(data),
            transform,
            options,
            current_point: Point::ZERO,
            subpath_start: Point::ZERO,
            previous_cubic: None,
            previous_quad: None,
            active: None,
            skipping: false,
            done: false,
        }
    }

    /// The transform applied to emitted points.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The pen position, in untransformed coordinates.
    pub fn current_point(&self) -> Point {
        self.current_point
    }

    /// Where the current subpath started, in untransformed coordinates.
    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    fn step(&mut self) -> Result<Option<Command>, ParseError> {
        loop {
            self.lexer.skip_whitespace();
            let token = self.lexer.peek();
            match token.kind {
                TokenKind::EndOfStream => return Ok(None),
                TokenKind::Letter(letter) => {
                    self.lexer.next_token();
                    if let Some(cmd) = self.begin_command(letter, token.offset)? {
                        return Ok(Some(cmd));
                    }
                }
                TokenKind::Number(_) | TokenKind::Comma if self.skipping => {
                    debug!("discarding operand at offset {}", token.offset);
                    self.lexer.next_token();
                }
                TokenKind::Number(_) | TokenKind::Comma => {
                    let Some(letter) = self.active else {
                        return Err(ParseError::new(
                            ErrorKind::UnexpectedToken(token.kind.to_string()),
                            token.offset,
                        ));
                    };
                    // A comma between operand groups must be followed by another group.
                    if !more_operands(&mut self.lexer).map_err(|e| e.in_command(letter))? {
                        let token = self.lexer.peek();
                        return Err(ParseError::new(
                            ErrorKind::UnexpectedToken(token.kind.to_string()),
                            token.offset,
                        )
                        .in_command(letter));
                    }
                    return self.operands(letter).map(Some);
                }
                TokenKind::Error(msg) => {
                    let err = ParseError::new(ErrorKind::Tokenize(msg), token.offset);
                    return Err(match self.active {
                        Some(letter) => err.in_command(letter),
                        None => err,
                    });
                }
                _ => {
                    return Err(ParseError::new(
                        ErrorKind::UnexpectedToken(token.kind.to_string()),
                        token.offset,
                    ))
                }
            }
        }
    }

    /// Handle a command letter, returning the first command it produces.
    fn begin_command(&mut self, letter: char, offset: usize) -> Result<Option<Command>, ParseError> {
        self.skipping = false;
        match letter {
            'Z' | 'z' => {
                self.active = None;
                Ok(Some(self.close_path()))
            }
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' => {
                self.active = Some(letter);
                self.lexer.skip_whitespace();
                let token = self.lexer.peek();
                if !matches!(token.kind, TokenKind::Number(_)) {
                    // Let the number parser report what is there instead.
                    expect_number(&mut self.lexer).map_err(|e| e.in_command(letter))?;
                }
                self.operands(letter).map(Some)
            }
            _ => match self.options.unknown_command {
                UnknownCommandPolicy::Fail => Err(ParseError::new(
                    ErrorKind::UnknownCommand(letter),
                    offset,
                )),
                UnknownCommandPolicy::Skip => {
                    warn!("skipping unknown path command {letter:?} at offset {offset}");
                    self.active = None;
                    self.skipping = true;
                    Ok(None)
                }
            },
        }
    }

    /// Parse one operand group of `letter` and produce its command.
    fn operands(&mut self, letter: char) -> Result<Command, ParseError> {
        self.operand_group(letter).map_err(|e| e.in_command(letter))
    }

    fn operand_group(&mut self, letter: char) -> Result<Command, ParseError> {
        let relative = letter.is_ascii_lowercase();
        // All points of a group are relative to the pen at the start of the group.
        let origin = if relative {
            self.current_point.to_vec2()
        } else {
            Default::default()
        };
        match letter {
            'M' | 'm' => {
                let p = parse_tuple(&mut self.lexer)? + origin;
                self.current_point = p;
                self.subpath_start = p;
                self.reset_prev_beziers();
                // Subsequent pairs are implicit line-to commands.
                self.active = Some(if relative { 'l' } else { 'L' });
                Ok(Command::move_to(self.transform * p))
            }
            'L' | 'l' => {
                let p = parse_tuple(&mut self.lexer)? + origin;
                Ok(self.line_to(p))
            }
            'H' | 'h' => {
                let x = expect_number(&mut self.lexer)? + origin.x;
                Ok(self.line_to(Point::new(x, self.current_point.y)))
            }
            'V' | 'v' => {
                let y = expect_number(&mut self.lexer)? + origin.y;
                Ok(self.line_to(Point::new(self.current_point.x, y)))
            }
            'C' | 'c' => {
                let ctrl1 = parse_tuple(&mut self.lexer)? + origin;
                self.lexer.skip_separator();
                let ctrl2 = parse_tuple(&mut self.lexer)? + origin;
                self.lexer.skip_separator();
                let to = parse_tuple(&mut self.lexer)? + origin;
                Ok(self.curve_to(ctrl1, ctrl2, to))
            }
            'S' | 's' => {
                let ctrl2 = parse_tuple(&mut self.lexer)? + origin;
                self.lexer.skip_separator();
                let to = parse_tuple(&mut self.lexer)? + origin;
                let ctrl1 = self.smooth_cubic_ctrl1();
                Ok(self.curve_to(ctrl1, ctrl2, to))
            }
            'Q' | 'q' => {
                let ctrl = parse_tuple(&mut self.lexer)? + origin;
                self.lexer.skip_separator();
                let to = parse_tuple(&mut self.lexer)? + origin;
                Ok(self.quad_to(ctrl, to))
            }
            'T' | 't' => {
                let to = parse_tuple(&mut self.lexer)? + origin;
                let ctrl = self.smooth_quad_ctrl();
                Ok(self.quad_to(ctrl, to))
            }
            _ => unreachable!("operand group for non-command {letter:?}"),
        }
    }

    fn line_to(&mut self, p: Point) -> Command {
        self.current_point = p;
        self.reset_prev_beziers();
        Command::line_to(self.transform * p)
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> Command {
        self.current_point = to;
        self.previous_cubic = Some(ctrl2);
        self.previous_quad = None;
        let t = self.transform;
        Command::curve_to(t * ctrl1, t * ctrl2, t * to)
    }

    /// Emit a quadratic Bézier, raised to the equivalent cubic.
    fn quad_to(&mut self, ctrl: Point, to: Point) -> Command {
        let from = self.current_point;
        let ctrl1 = from.lerp(ctrl, 2.0 / 3.0);
        let ctrl2 = to.lerp(ctrl, 2.0 / 3.0);
        self.current_point = to;
        self.previous_quad = Some(ctrl);
        self.previous_cubic = None;
        let t = self.transform;
        Command::curve_to(t * ctrl1, t * ctrl2, t * to)
    }

    fn close_path(&mut self) -> Command {
        self.current_point = self.subpath_start;
        self.reset_prev_beziers();
        match self.options.close_style {
            CloseStyle::ClosePath => Command::close_path(),
            CloseStyle::LineTo => Command::line_to(self.transform * self.subpath_start),
        }
    }

    fn reset_prev_beziers(&mut self) {
        self.previous_cubic = None;
        self.previous_quad = None;
    }

    /// The ctrl1 of a smooth cubic is the reflection of the previous ctrl2 through the current
    /// point, or just the current point if the previous segment wasn't a cubic.
    fn smooth_cubic_ctrl1(&self) -> Point {
        match self.previous_cubic {
            Some(ctrl2) => ctrl2.reflect_about(self.current_point),
            None => self.current_point,
        }
    }

    /// The ctrl of a smooth quad is the reflection of the previous ctrl through the current
    /// point, or just the current point if the previous segment wasn't a quad.
    fn smooth_quad_ctrl(&self) -> Point {
        match self.previous_quad {
            Some(ctrl) => ctrl.reflect_about(self.current_point),
            None => self.current_point,
        }
    }
}

impl Iterator for Commands<'_> {
    type Item = Result<Command, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(cmd)) => {
                trace!("{:?} {:?}", cmd.kind, cmd.points.as_slice());
                Some(Ok(cmd))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                debug!("path data rejected: {err}");
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for Commands<'_> {}
