// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interpreter configuration.

/// Options controlling how path data is interpreted.
///
/// The defaults interpret as much of a path as possible: unknown command
/// letters are skipped with a warning, and close commands are emitted as
/// [`ClosePath`](crate::CommandKind::ClosePath).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// What to do with a letter that is not a path command.
    pub unknown_command: UnknownCommandPolicy,
    /// How `Z`/`z` is emitted.
    pub close_style: CloseStyle,
}

/// What to do with an unrecognized command letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownCommandPolicy {
    /// Log a warning and discard the letter together with its operands.
    #[default]
    Skip,
    /// Stop with [`ErrorKind::UnknownCommand`](crate::ErrorKind::UnknownCommand).
    Fail,
}

/// How a close command is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloseStyle {
    /// A [`ClosePath`](crate::CommandKind::ClosePath) command with no points.
    #[default]
    ClosePath,
    /// A [`LineTo`](crate::CommandKind::LineTo) back to the start of the subpath.
    LineTo,
}

impl ParseOptions {
    /// The default options.
    pub const fn new() -> Self {
        ParseOptions {
            unknown_command: UnknownCommandPolicy::Skip,
            close_style: CloseStyle::ClosePath,
        }
    }

    /// Set the policy for unknown command letters.
    #[must_use]
    pub fn with_unknown_command(mut self, policy: UnknownCommandPolicy) -> Self {
        self.unknown_command = policy;
        self
    }

    /// Set how close commands are emitted.
    #[must_use]
    pub fn with_close_style(mut self, style: CloseStyle) -> Self {
        self.close_style = style;
        self
    }
}
