// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streaming interpretation of SVG path data.
//!
//! Pathstream turns the `d` attribute of an SVG `<path>` into a sequence of
//! absolute drawing commands: move, line, cubic curve and close. Relative
//! coordinates, horizontal and vertical lines, smooth curves and quadratic
//! curves are all normalized away, and an affine transform (usually parsed
//! from `transform` attributes) is applied to every emitted point.
//!
//! Commands are produced lazily by an iterator, so a consumer can start
//! drawing before the rest of the path has been read, and can stop early by
//! dropping the iterator.
//!
//! # Examples
//!
//! ```
//! use pathstream::{parse_path, parse_transform, Command, CommandKind};
//!
//! let transform = parse_transform("translate(100, 0) scale(2)").unwrap();
//! let mut commands = parse_path("M0,0 h10 q5,5 10,0 z", transform);
//!
//! assert_eq!(commands.next(), Some(Ok(Command::move_to((100.0, 0.0)))));
//! assert_eq!(commands.next(), Some(Ok(Command::line_to((120.0, 0.0)))));
//! let curve = commands.next().unwrap().unwrap();
//! assert_eq!(curve.kind, CommandKind::CurveTo);
//! assert_eq!(curve.end_point(), Some((140.0, 0.0).into()));
//! assert_eq!(commands.next(), Some(Ok(Command::close_path())));
//! assert_eq!(commands.next(), None);
//! ```
//!
//! Malformed input ends the stream with an error, which records where in the
//! source the problem was found:
//!
//! ```
//! use pathstream::{parse_path, Affine, ErrorKind};
//!
//! let results: Vec<_> = parse_path("M10,10 L20", Affine::IDENTITY).collect();
//! assert_eq!(results.len(), 2);
//! let err = results[1].as_ref().unwrap_err();
//! assert_eq!(err.kind(), &ErrorKind::MissingOperand);
//! assert_eq!(err.command(), Some('L'));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. This is useful for
//! `no_std` environments. The `alloc` crate is used regardless.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("pathstream requires either the `std` or `libm` feature");

extern crate alloc;

mod affine;
mod command;
mod common;
mod element;
mod error;
mod interp;
pub mod lexer;
pub mod operand;
mod options;
mod point;
mod transform;
mod vec2;

pub use crate::affine::*;
pub use crate::command::*;
pub use crate::element::*;
pub use crate::error::*;
pub use crate::interp::*;
pub use crate::options::*;
pub use crate::point::*;
pub use crate::transform::*;
pub use crate::vec2::*;
