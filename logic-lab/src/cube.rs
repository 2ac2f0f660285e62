// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Cover,
    errors::{Error, Result},
    literal::Literal,
};
use arrayvec::ArrayVec;
use std::{borrow::Cow, fmt, ops::Index};

/// A product term over `arity()` input variables.
///
/// Variable `i` corresponds to bit `i` of a minterm index. Cubes are values: every
/// operation that would change a literal returns a new cube.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cube {
    literals: ArrayVec<Literal, MAX_CUBE_LEN>,
}

const MAX_CUBE_LEN: usize = 32;

impl Cube {
    /// The largest supported arity.
    pub const MAX_LEN: usize = MAX_CUBE_LEN;

    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Result<Self> {
        let literals: Vec<_> = literals.into_iter().collect();
        if literals.len() > Self::MAX_LEN {
            return Err(Error::ArityTooLarge {
                arity: literals.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self {
            literals: literals.into_iter().collect(),
        })
    }

    // Uses the representation in the Espresso book.
    pub fn from_numeric(numeric: &[u8]) -> Result<Self> {
        let literals = numeric
            .iter()
            .map(|&val| Literal::try_from(val))
            .collect::<Result<Vec<_>>>()?;
        Self::new(literals)
    }

    /// Parses a pattern such as `"01-1"`. Position `i` of the string is variable `i`.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let literals = pattern
            .chars()
            .map(Literal::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(literals)
    }

    /// The cube containing every assignment.
    pub fn universe(arity: usize) -> Result<Self> {
        check_arity(arity)?;
        Ok(Self::universe_impl(arity))
    }

    /// The fully specified cube for minterm `index`.
    pub fn minterm(arity: usize, index: u32) -> Result<Self> {
        check_arity(arity)?;
        if arity < 32 && (index >> arity) != 0 {
            return Err(Error::inconsistent(format!(
                "minterm {} does not fit in {} inputs",
                index, arity
            )));
        }
        Ok(Self::minterm_impl(arity, index))
    }

    pub(crate) fn universe_impl(arity: usize) -> Self {
        debug_assert!(arity <= Self::MAX_LEN);
        Self {
            literals: std::iter::repeat(Literal::DontCare).take(arity).collect(),
        }
    }

    pub(crate) fn minterm_impl(arity: usize, index: u32) -> Self {
        debug_assert!(arity <= Self::MAX_LEN);
        Self {
            literals: (0..arity)
                .map(|var| Literal::from((index >> var) & 1 == 1))
                .collect(),
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.literals.len()
    }

    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    #[inline]
    pub fn get(&self, var: usize) -> Option<Literal> {
        self.literals.get(var).copied()
    }

    /// Returns a copy of this cube with variable `var` set to `literal`.
    ///
    /// Panics if `var` is out of range. See [`try_with_literal`](Self::try_with_literal)
    /// for the fallible version.
    pub fn with_literal(&self, var: usize, literal: Literal) -> Self {
        assert!(
            var < self.arity(),
            "variable {} must be in range [0..{})",
            var,
            self.arity()
        );
        let mut literals = self.literals.clone();
        literals[var] = literal;
        Self { literals }
    }

    pub fn try_with_literal(&self, var: usize, literal: Literal) -> Result<Self> {
        if var >= self.arity() {
            return Err(Error::ElementOutOfRange {
                element: var,
                nelem: self.arity(),
            });
        }
        Ok(self.with_literal(var, literal))
    }

    /// Number of defined (non-don't-care) literals.
    pub fn literal_count(&self) -> usize {
        self.literals.iter().filter(|l| l.is_defined()).count()
    }

    /// Number of `One` literals. Quine–McCluskey groups cubes by this value.
    pub fn ones_count(&self) -> usize {
        self.literals
            .iter()
            .filter(|&&l| l == Literal::One)
            .count()
    }

    #[inline]
    pub fn is_minterm(&self) -> bool {
        self.literals.iter().all(|l| l.is_defined())
    }

    /// Returns the minterm index if this cube is fully specified.
    pub fn minterm_index(&self) -> Option<u32> {
        let mut index = 0;
        for (var, literal) in self.literals.iter().enumerate() {
            match literal {
                Literal::One => index |= 1 << var,
                Literal::Zero => {}
                Literal::DontCare => return None,
            }
        }
        Some(index)
    }

    /// Returns true if the assignment `index` lies inside this cube.
    pub fn evaluate(&self, index: u32) -> bool {
        self.literals
            .iter()
            .enumerate()
            .all(|(var, &literal)| match literal.to_bool() {
                Some(value) => ((index >> var) & 1 == 1) == value,
                None => true,
            })
    }

    /// Iterates over the minterm indices contained in this cube, in increasing order.
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        let base = self
            .literals
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == Literal::One)
            .fold(0_u32, |acc, (var, _)| acc | (1 << var));
        let free: Vec<usize> = self
            .literals
            .iter()
            .enumerate()
            .filter_map(|(var, l)| (!l.is_defined()).then(|| var))
            .collect();
        (0..1_u64 << free.len()).map(move |subset| {
            free.iter()
                .enumerate()
                .filter(|(bit, _)| (subset >> bit) & 1 == 1)
                .fold(base, |acc, (_, &var)| acc | (1 << var))
        })
    }

    /// Returns true if every assignment in `other` is also in `self`.
    ///
    /// Cubes of different arity never contain each other.
    pub fn contains(&self, other: &Cube) -> bool {
        self.arity() == other.arity()
            && self
                .literals
                .iter()
                .zip(&other.literals)
                .all(|(&c, &d)| c.contains(d))
    }

    pub fn strictly_contains(&self, other: &Cube) -> bool {
        self != other && self.contains(other)
    }

    pub fn try_contains(&self, other: &Cube) -> Result<bool> {
        self.check_same_arity(other)?;
        Ok(self.contains(other))
    }

    /// Returns true if `self` and `other` differ only in one position, where one has
    /// `Zero` and the other `One`.
    pub fn is_mergeable(&self, other: &Cube) -> bool {
        self.merge_position(other).is_some()
    }

    /// Merges two adjacent cubes, raising the differing position to don't-care.
    ///
    /// Returns `None` if the cubes are not mergeable.
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        let var = self.merge_position(other)?;
        Some(self.with_literal(var, Literal::DontCare))
    }

    pub fn try_merge(&self, other: &Cube) -> Result<Option<Cube>> {
        self.check_same_arity(other)?;
        Ok(self.merge(other))
    }

    /// Intersects two cubes. Returns `Ok(None)` if they share no assignment.
    pub fn intersect(&self, other: &Cube) -> Result<Option<Cube>> {
        self.check_same_arity(other)?;
        let mut literals = ArrayVec::new();
        for (&c, &d) in self.literals.iter().zip(&other.literals) {
            match intersect_one(c, d) {
                Some(literal) => literals.push(literal),
                None => return Ok(None),
            }
        }
        Ok(Some(Self { literals }))
    }

    /// The De Morgan complement of this cube, as a sum of single-literal cubes.
    ///
    /// The complement of the universe cube is the empty cover.
    pub fn complement(&self) -> Cover {
        let mut cover = Cover::with_arity(self.arity());
        for (var, &literal) in self.literals.iter().enumerate() {
            if literal.is_defined() {
                let cube = Self::universe_impl(self.arity()).with_literal(var, literal.invert());
                cover.insert_unchecked(cube);
            }
        }
        cover
    }

    #[inline]
    pub fn matrix_display(&self) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CubeAlgebraicDisplay<'_> {
        CubeAlgebraicDisplay::new(self)
    }

    #[inline]
    pub(crate) fn check_same_arity(&self, other: &Cube) -> Result<()> {
        if self.arity() == other.arity() {
            Ok(())
        } else {
            Err(Error::arity_mismatch(self.arity(), other.arity()))
        }
    }

    fn merge_position(&self, other: &Cube) -> Option<usize> {
        if self.arity() != other.arity() {
            return None;
        }
        let mut position = None;
        for (var, (&c, &d)) in self.literals.iter().zip(&other.literals).enumerate() {
            if c == d {
                continue;
            }
            if !c.is_complement_of(d) || position.is_some() {
                return None;
            }
            position = Some(var);
        }
        position
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matrix_display())
    }
}

impl Index<usize> for Cube {
    type Output = Literal;

    fn index(&self, var: usize) -> &Literal {
        &self.literals[var]
    }
}

fn check_arity(arity: usize) -> Result<()> {
    if arity > Cube::MAX_LEN {
        Err(Error::ArityTooLarge {
            arity,
            max: Cube::MAX_LEN,
        })
    } else {
        Ok(())
    }
}

// Intersect one position. `None` means the intersection is empty.
fn intersect_one(c: Literal, d: Literal) -> Option<Literal> {
    match (c, d) {
        (Literal::DontCare, d) => Some(d),
        (c, Literal::DontCare) => Some(c),
        (c, d) if c == d => Some(c),
        _ => None,
    }
}

pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
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
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arity = self.cube.arity();
        for (var, &literal) in self.cube.literals().iter().enumerate() {
            write!(f, "{}", self.format.char_for_literal(literal))?;
            if var + 1 < arity {
                write!(f, "{}", self.internal_separator)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum MatrixDisplayFormat {
    /// Display a cube using the format `100-1`, with dashes representing don't-cares.
    Dashes,

    /// Display a cube using the format `10021`, with 2 representing don't-cares.
    Numeric,
}

impl MatrixDisplayFormat {
    /// Returns the character that would be displayed for a literal.
    pub fn char_for_literal(self, literal: Literal) -> char {
        match (self, literal) {
            (_, Literal::One) => '1',
            (_, Literal::Zero) => '0',
            (Self::Dashes, Literal::DontCare) => '-',
            (Self::Numeric, Literal::DontCare) => '2',
        }
    }
}

impl Default for MatrixDisplayFormat {
    fn default() -> Self {
        Self::Dashes
    }
}

/// Displays a cube as a product term (`ab'd`), or with [`de_morgan`](Self::de_morgan)
/// as the sum term of its complement (`(a' + b + d')`).
pub struct CubeAlgebraicDisplay<'a> {
    cube: &'a Cube,
    names: Option<&'a [&'a str]>,
    de_morgan: bool,
}

impl<'a> CubeAlgebraicDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self {
            cube,
            names: None,
            de_morgan: false,
        }
    }

    /// Uses `names[i]` for variable `i` instead of `a`, `b`, ...
    pub fn with_variable_names(mut self, names: &'a [&'a str]) -> Self {
        self.names = Some(names);
        self
    }

    pub fn de_morgan(mut self, de_morgan: bool) -> Self {
        self.de_morgan = de_morgan;
        self
    }

    fn write_variable(&self, f: &mut fmt::Formatter, var: usize, positive: bool) -> fmt::Result {
        match self.names.and_then(|names| names.get(var)) {
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "{}", AlgebraicSymbol::input(var))?,
        }
        if !positive {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for CubeAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let defined = self
            .cube
            .literals()
            .iter()
            .enumerate()
            .filter_map(|(var, literal)| literal.to_bool().map(|value| (var, value)));

        if self.de_morgan {
            if self.cube.literal_count() == 0 {
                return write!(f, "0");
            }
            write!(f, "(")?;
            for (n, (var, value)) in defined.enumerate() {
                if n > 0 {
                    write!(f, " + ")?;
                }
                self.write_variable(f, var, !value)?;
            }
            write!(f, ")")
        } else {
            if self.cube.literal_count() == 0 {
                return write!(f, "1");
            }
            for (var, value) in defined {
                self.write_variable(f, var, value)?;
            }
            Ok(())
        }
    }
}

const INPUT_ALGEBRAIC_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug)]
pub(crate) enum AlgebraicSymbol {
    Char(char),
    String(String),
}

impl AlgebraicSymbol {
    pub(crate) fn input(ix: usize) -> Self {
        if ix < 26 {
            return Self::Char(INPUT_ALGEBRAIC_SYMBOLS[ix]);
        }
        let rest = ix / 26;
        let last_ch = INPUT_ALGEBRAIC_SYMBOLS[ix % 26];

        match Self::input(rest) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for AlgebraicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}
