// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    boolfunc::BoolFunc,
    cover::{CoverAlgebraicDisplay, CoverMatrixDisplay},
    cube::Cube,
    errors::{Error, Result},
};
use std::collections::HashSet;

/// A sum of products: an ordered, duplicate-free collection of cubes of one arity.
///
/// Insertion order is kept for deterministic output but does not affect equality.
/// Cubes subsumed by other cubes are kept; use
/// [`single_cube_containment`](Self::single_cube_containment) to drop them.
#[derive(Clone, Default)]
pub struct Cover {
    arity: usize,
    elements: Vec<Cube>,
    seen: HashSet<Cube>,
}

impl Cover {
    /// Creates an empty cover (the constant 0 function) over `arity` inputs.
    pub fn with_arity(arity: usize) -> Self {
        Self {
            arity,
            elements: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn new(arity: usize, elements: impl IntoIterator<Item = Cube>) -> Result<Self> {
        let mut cover = Self::with_arity(arity);
        for cube in elements {
            cover.insert(cube)?;
        }
        Ok(cover)
    }

    pub fn from_numeric<I>(arity: usize, numeric: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let elements = numeric
            .into_iter()
            .map(|input| Cube::from_numeric(input.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(arity, elements)
    }

    pub fn from_patterns<I>(arity: usize, patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let elements = patterns
            .into_iter()
            .map(|pattern| Cube::from_pattern(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(arity, elements)
    }

    /// Adds `cube` to the end of the cover. Returns false if it was already present.
    pub fn insert(&mut self, cube: Cube) -> Result<bool> {
        if cube.arity() != self.arity {
            return Err(Error::arity_mismatch(self.arity, cube.arity()));
        }
        Ok(self.insert_unchecked(cube))
    }

    pub(crate) fn insert_unchecked(&mut self, cube: Cube) -> bool {
        debug_assert_eq!(cube.arity(), self.arity);
        if self.seen.contains(&cube) {
            return false;
        }
        self.seen.insert(cube.clone());
        self.elements.push(cube);
        true
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.elements.len()
    }

    /// Total number of literals over all cubes.
    pub fn literal_count(&self) -> usize {
        self.elements.iter().map(Cube::literal_count).sum()
    }

    #[inline]
    pub fn elements(&self) -> &[Cube] {
        &self.elements
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Cube> {
        self.elements.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns true if a structurally identical cube is part of this cover.
    #[inline]
    pub fn contains_cube(&self, cube: &Cube) -> bool {
        self.seen.contains(cube)
    }

    /// Returns true if assignment `index` is covered by some cube.
    pub fn evaluate(&self, index: u32) -> bool {
        self.elements.iter().any(|elem| elem.evaluate(index))
    }

    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.arity != other.arity {
            return Err(Error::arity_mismatch(self.arity, other.arity));
        }
        let mut union = self.clone();
        for cube in other.iter() {
            union.insert_unchecked(cube.clone());
        }
        Ok(union)
    }

    /// Removes every cube strictly contained in another cube of the cover.
    pub fn single_cube_containment(&self) -> Self {
        let simplified = self.elements.iter().filter(|elem| {
            !self
                .elements
                .iter()
                .any(|contains| contains.strictly_contains(elem))
        });
        let mut cover = Self::with_arity(self.arity);
        for cube in simplified {
            cover.insert_unchecked(cube.clone());
        }
        cover
    }

    /// Compares two covers on every assignment and returns the first assignment on
    /// which they differ, if any.
    pub fn first_difference(&self, other: &Self) -> Result<Option<u32>> {
        if self.arity != other.arity {
            return Err(Error::arity_mismatch(self.arity, other.arity));
        }
        let exp = BoolFunc::assignment_count(self.arity)?;
        Ok((0..exp).find(|&index| self.evaluate(index) != other.evaluate(index)))
    }

    /// Returns true if this cover is 1 on the function's on-set and 0 on its off-set.
    pub fn agrees_with(&self, func: &BoolFunc) -> Result<bool> {
        if self.arity != func.arity() {
            return Err(Error::arity_mismatch(func.arity(), self.arity));
        }
        let sets = func.minterms();
        Ok(sets.on_set().iter().all(|&index| self.evaluate(index))
            && sets.off_set().iter().all(|&index| !self.evaluate(index)))
    }

    #[inline]
    pub fn matrix_display(&self) -> CoverMatrixDisplay<'_> {
        CoverMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CoverAlgebraicDisplay<'_> {
        CoverAlgebraicDisplay::new(self)
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity && self.seen == other.seen
    }
}

impl Eq for Cover {}

impl<'a> IntoIterator for &'a Cover {
    type Item = &'a Cube;
    type IntoIter = std::slice::Iter<'a, Cube>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literal::Literal, proptest_helpers::cover_strategy};
    use proptest::prelude::*;

    #[test]
    fn test_insert_dedups() {
        let mut cover = Cover::with_arity(3);
        assert_eq!(cover.insert(Cube::from_pattern("1-0").unwrap()), Ok(true));
        assert_eq!(cover.insert(Cube::from_pattern("0--").unwrap()), Ok(true));
        assert_eq!(cover.insert(Cube::from_pattern("1-0").unwrap()), Ok(false));
        assert_eq!(cover.cube_count(), 2);
        assert_eq!(cover.literal_count(), 3);
        assert_eq!(
            cover.insert(Cube::from_pattern("1-").unwrap()),
            Err(Error::ArityMismatch {
                expected: 3,
                actual: 2
            })
        );

        // Insertion order is kept.
        let patterns: Vec<_> = cover
            .iter()
            .map(|cube| cube.matrix_display().to_string())
            .collect();
        assert_eq!(patterns, ["1-0", "0--"]);
    }

    #[test]
    fn test_subsumed_cubes_are_kept() {
        let cover = Cover::from_patterns(2, ["1-", "11"]).unwrap();
        assert_eq!(cover.cube_count(), 2);
        let simplified = cover.single_cube_containment();
        assert_eq!(simplified, Cover::from_patterns(2, ["1-"]).unwrap());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Cover::from_numeric(3, [[1, 2, 0], [0, 1, 1]]).unwrap();
        let b = Cover::from_numeric(3, [[0, 1, 1], [1, 2, 0]]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Cover::with_arity(3));
    }

    #[test]
    fn test_union_and_equivalence() {
        let a = Cover::from_patterns(2, ["1-"]).unwrap();
        let b = Cover::from_patterns(2, ["-1", "1-"]).unwrap();
        let union = a.union(&b).unwrap();
        assert_eq!(union.cube_count(), 2);

        let or = Cover::from_patterns(2, ["10", "01", "11"]).unwrap();
        assert_eq!(union.first_difference(&or), Ok(None));
        assert_eq!(a.first_difference(&or), Ok(Some(0b10)));
        assert!(a.union(&Cover::with_arity(3)).is_err());
    }

    #[test]
    fn test_agrees_with() {
        let func = BoolFunc::from_pattern(2, "01--").unwrap();
        let good = Cover::new(2, [Cube::minterm(2, 1).unwrap()]).unwrap();
        let also_good = Cover::from_patterns(2, ["1-"]).unwrap();
        let bad = Cover::new(2, [Cube::universe(2).unwrap()]).unwrap();
        assert_eq!(good.agrees_with(&func), Ok(true));
        assert_eq!(also_good.agrees_with(&func), Ok(true));
        assert_eq!(bad.agrees_with(&func), Ok(false));

        let literal = Cube::universe(2).unwrap().with_literal(0, Literal::One);
        assert!(also_good.contains_cube(&literal));
    }

    proptest! {
        #[test]
        fn proptest_simplify_and_union(a in cover_strategy(4, 6), b in cover_strategy(4, 6)) {
            let simplified = a.single_cube_containment();
            prop_assert!(simplified.cube_count() <= a.cube_count());
            prop_assert_eq!(simplified.first_difference(&a), Ok(None));

            let union = a.union(&b).unwrap();
            for index in 0..16 {
                prop_assert_eq!(union.evaluate(index), a.evaluate(index) || b.evaluate(index));
            }
            if let Some(index) = a.first_difference(&b).unwrap() {
                prop_assert_ne!(a.evaluate(index), b.evaluate(index));
            }
        }
    }
}
