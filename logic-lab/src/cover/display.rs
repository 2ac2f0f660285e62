// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::MatrixDisplayFormat};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&self.arity())
            .field(&format_args!("{}", self.algebraic_display()))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CoverMatrixDisplay<'a> {
    cover: &'a Cover,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
    cube_separator: (Cow<'a, str>, bool),
}

impl<'a> CoverMatrixDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
            cube_separator: (Cow::Borrowed("\n"), true),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }

    pub fn with_cube_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.cube_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for CoverMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cube_count = self.cover.cube_count();
        for (elem_ix, elem) in self.cover.iter().enumerate() {
            let cube_display = elem
                .matrix_display()
                .with_format(self.format)
                .with_internal_separator(&*self.internal_separator);
            write!(f, "{}", cube_display)?;

            let (cube_separator, print_last) = &self.cube_separator;
            if *print_last || elem_ix < cube_count - 1 {
                write!(f, "{}", cube_separator)?;
            }
        }

        Ok(())
    }
}

/// Displays a cover as a sum of products (`ab' + c`).
///
/// With [`de_morgan`](Self::de_morgan) the cover is read as the off-set of a
/// function, and the function is written as a product of sums (`(a' + b)(c')`).
pub struct CoverAlgebraicDisplay<'a> {
    cover: &'a Cover,
    names: Option<&'a [&'a str]>,
    de_morgan: bool,
}

impl<'a> CoverAlgebraicDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            names: None,
            de_morgan: false,
        }
    }

    pub fn with_variable_names(mut self, names: &'a [&'a str]) -> Self {
        self.names = Some(names);
        self
    }

    pub fn de_morgan(mut self, de_morgan: bool) -> Self {
        self.de_morgan = de_morgan;
        self
    }
}

impl<'a> fmt::Display for CoverAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cover.is_empty() {
            // An empty sum is 0; an empty product is 1.
            return write!(f, "{}", if self.de_morgan { "1" } else { "0" });
        }
        for elem in self.cover.iter().with_position() {
            let (cube, last) = match elem {
                Position::First(cube) | Position::Middle(cube) => (cube, false),
                Position::Last(cube) | Position::Only(cube) => (cube, true),
            };
            let mut display = cube.algebraic_display().de_morgan(self.de_morgan);
            if let Some(names) = self.names {
                display = display.with_variable_names(names);
            }
            write!(f, "{}", display)?;
            if !last && !self.de_morgan {
                write!(f, " + ")?;
            }
        }
        Ok(())
    }
}
