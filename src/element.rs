// Copyright 2024 the Pathstream Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path elements as a document model hands them over.

use alloc::vec::Vec;

use log::debug;

use crate::{parse_transform, Affine, Commands, ParseError, ParseOptions};

/// The stroke width used when a style does not give a usable one.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// The declarations of an inline `style` attribute.
///
/// Declarations are kept in source order. When a property is declared more
/// than once, the last declaration wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style<'a> {
    declarations: Vec<(&'a str, &'a str)>,
}

impl<'a> Style<'a> {
    /// Split `prop: value; prop: value` into declarations.
    ///
    /// Empty declarations and declarations without a `:` are ignored.
    pub fn parse(src: &'a str) -> Self {
        let declarations = src
            .split(';')
            .filter_map(|decl| {
                let (prop, value) = decl.split_once(':')?;
                let prop = prop.trim();
                (!prop.is_empty()).then_some((prop, value.trim()))
            })
            .collect();
        Style { declarations }
    }

    /// The value of a property.
    pub fn get(&self, prop: &str) -> Option<&'a str> {
        self.declarations
            .iter()
            .rev()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| *v)
    }

    /// Iterate over the declarations in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.declarations.iter().copied()
    }

    /// The `stroke-width` property in user units.
    ///
    /// A `px` suffix is accepted. If the property is missing, malformed or
    /// negative, this is [`DEFAULT_STROKE_WIDTH`].
    pub fn stroke_width(&self) -> f64 {
        let Some(value) = self.get("stroke-width") else {
            return DEFAULT_STROKE_WIDTH;
        };
        let number = value.strip_suffix("px").unwrap_or(value).trim_end();
        match number.parse::<f64>() {
            Ok(width) if width.is_finite() && width >= 0.0 => width,
            _ => {
                debug!("ignoring stroke-width {value:?}, using {DEFAULT_STROKE_WIDTH}");
                DEFAULT_STROKE_WIDTH
            }
        }
    }
}

/// A path element: its path data, style, and transform.
///
/// The transform starts out as the one inherited from enclosing groups. A
/// transform on the element itself is applied before the inherited one.
///
/// ```
/// use pathstream::{Affine, Command, PathElement};
///
/// let path = PathElement::new("M1,0", "stroke-width: 2", Affine::translate((5.0, 0.0)))
///     .with_transform_attr("scale(2,1)")
///     .unwrap();
/// let commands: Vec<_> = path.commands().collect::<Result<_, _>>().unwrap();
/// assert_eq!(commands, [Command::move_to((7.0, 0.0))]);
/// assert_eq!(path.stroke_width(), 2.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathElement<'a> {
    data: &'a str,
    style: Style<'a>,
    transform: Affine,
}

impl<'a> PathElement<'a> {
    /// Create an element from its `d` and `style` attributes and the
    /// transform of its parent group.
    pub fn new(data: &'a str, style: &'a str, inherited: Affine) -> Self {
        PathElement {
            data,
            style: Style::parse(style),
            transform: inherited,
        }
    }

    /// Apply a transform declared on the element itself.
    #[must_use]
    pub fn with_transform(mut self, local: Affine) -> Self {
        self.transform = self.transform * local;
        self
    }

    /// Parse the element's `transform` attribute and apply it.
    ///
    /// # Errors
    ///
    /// Returns the error from [`parse_transform`] if the attribute is malformed.
    pub fn with_transform_attr(self, attr: &str) -> Result<Self, ParseError> {
        let local = parse_transform(attr)?;
        Ok(self.with_transform(local))
    }

    /// The path's commands, with the element's transform applied.
    pub fn commands(&self) -> Commands<'a> {
        Commands::new(self.data, self.transform)
    }

    /// The path's commands, interpreted with the given options.
    pub fn commands_with(&self, options: ParseOptions) -> Commands<'a> {
        Commands::with_options(self.data, self.transform, options)
    }

    /// The raw path data.
    pub fn data(&self) -> &'a str {
        self.data
    }

    /// The element's style.
    pub fn style(&self) -> &Style<'a> {
        &self.style
    }

    /// Shorthand for `self.style().stroke_width()`.
    pub fn stroke_width(&self) -> f64 {
        self.style.stroke_width()
    }

    /// The transform from path coordinates to document coordinates.
    pub fn transform(&self) -> Affine {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CloseStyle, Command, ErrorKind, Point};

    #[test]
    fn style_declarations() {
        let style = Style::parse(" fill : red;stroke-width:3 ; ;bogus; fill: blue ");
        assert_eq!(style.get("fill"), Some("blue"));
        assert_eq!(style.get("stroke"), None);
        assert_eq!(style.stroke_width(), 3.0);
        assert_eq!(
            style.iter().collect::<Vec<_>>(),
            [("fill", "red"), ("stroke-width", "3"), ("fill", "blue")]
        );
        assert_eq!(Style::parse(""), Style::default());
    }

    #[test]
    fn stroke_width_fallbacks() {
        assert_eq!(Style::parse("stroke-width: 2.5px").stroke_width(), 2.5);
        assert_eq!(Style::parse("stroke-width: 0").stroke_width(), 0.0);
        for src in ["", "fill: none", "stroke-width: wide", "stroke-width: -1"] {
            assert_eq!(Style::parse(src).stroke_width(), DEFAULT_STROKE_WIDTH, "{src}");
        }
    }

    #[test]
    fn local_transform_applies_first() {
        let path = PathElement::new("M1,0", "", Affine::translate((5., 0.)))
            .with_transform(Affine::scale_non_uniform(2., 1.));
        let first = path.commands().next().unwrap().unwrap();
        assert_eq!(first, Command::move_to((7., 0.)));
    }

    #[test]
    fn transform_attr_errors() {
        let err = PathElement::new("M0,0", "", Affine::IDENTITY)
            .with_transform_attr("")
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoTransform);
    }

    #[test]
    fn commands_are_repeatable() {
        let path = PathElement::new("M0,0 L10,0 Z", "", Affine::scale(2.));
        let a: Vec<_> = path.commands().collect();
        let b: Vec<_> = path.commands().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);

        let options = ParseOptions::new().with_close_style(CloseStyle::LineTo);
        let last = path.commands_with(options).last().unwrap().unwrap();
        assert_eq!(last.end_point(), Some(Point::ZERO));
    }
}
