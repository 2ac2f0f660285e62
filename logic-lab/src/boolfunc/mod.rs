// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completely or incompletely specified Boolean functions.

mod caches;

pub use caches::MintermSets;

use crate::{
    cover::Cover,
    cube::Cube,
    errors::{Error, Result},
    literal::Literal,
};
use caches::FuncCache;
use std::fmt;

/// A single-output Boolean function over `arity()` inputs, stored as a dense truth table.
///
/// Entry `i` of the table is the value at the assignment whose variable `v` is bit `v`
/// of `i`. Don't-care entries make the function incompletely specified.
#[derive(Clone)]
pub struct BoolFunc {
    arity: usize,
    table: Vec<Literal>,
    cache: FuncCache,
}

impl BoolFunc {
    /// The largest supported number of inputs.
    pub const MAX_INPUTS: usize = 20;

    /// Creates the constant 0 function.
    pub fn new(arity: usize) -> Result<Self> {
        Self::const0(arity)
    }

    pub fn const0(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |_| Literal::Zero)
    }

    pub fn const1(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |_| Literal::One)
    }

    /// The projection onto input `var`.
    pub fn literal(arity: usize, var: usize) -> Result<Self> {
        if var >= arity {
            return Err(Error::ElementOutOfRange {
                element: var,
                nelem: arity,
            });
        }
        Self::from_fn(arity, |index| Literal::from((index >> var) & 1 == 1))
    }

    pub fn and_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| {
            Literal::from(index.count_ones() as usize == arity)
        })
    }

    pub fn or_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| Literal::from(index != 0))
    }

    pub fn nand_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| {
            Literal::from(index.count_ones() as usize != arity)
        })
    }

    pub fn nor_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| Literal::from(index == 0))
    }

    pub fn xor_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| Literal::from(index.count_ones() % 2 == 1))
    }

    pub fn xnor_of(arity: usize) -> Result<Self> {
        Self::from_fn(arity, |index| Literal::from(index.count_ones() % 2 == 0))
    }

    /// Builds a function by evaluating `f` at every assignment in increasing order.
    pub fn from_fn(arity: usize, mut f: impl FnMut(u32) -> Literal) -> Result<Self> {
        let size = Self::assignment_count(arity)?;
        let table = (0..size).map(|index| f(index)).collect();
        Ok(Self::from_table(arity, table))
    }

    /// Builds a function from an explicit truth table of length `2^arity`.
    pub fn from_values(arity: usize, values: Vec<Literal>) -> Result<Self> {
        let size = Self::assignment_count(arity)? as usize;
        if values.len() != size {
            return Err(Error::arity_mismatch(size, values.len()));
        }
        Ok(Self::from_table(arity, values))
    }

    /// Parses a truth table such as `"01-1"`, where character `i` is the value at
    /// assignment `i`.
    pub fn from_pattern(arity: usize, pattern: &str) -> Result<Self> {
        let values = pattern
            .chars()
            .map(Literal::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::from_values(arity, values)
    }

    /// Builds a function from its on-set, don't-care-set and off-set.
    ///
    /// The three lists must partition `0..2^arity`. A minterm listed twice in the same
    /// set is accepted.
    pub fn from_minterms(arity: usize, on: &[u32], dc: &[u32], off: &[u32]) -> Result<Self> {
        let slots = assign_minterms(
            arity,
            &[(on, Literal::One), (dc, Literal::DontCare), (off, Literal::Zero)],
        )?;
        let table = (0_u32..)
            .zip(slots)
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    Error::inconsistent(format!(
                        "minterm {} is in none of the on, don't-care and off sets",
                        index
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_table(arity, table))
    }

    /// Builds a function from its on-set and don't-care-set. Every other minterm is 0.
    pub fn from_on_dc(arity: usize, on: &[u32], dc: &[u32]) -> Result<Self> {
        let slots = assign_minterms(arity, &[(on, Literal::One), (dc, Literal::DontCare)])?;
        let table = slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Literal::Zero))
            .collect();
        Ok(Self::from_table(arity, table))
    }

    /// Builds the function whose on-set is the set of minterms covered by `on`.
    ///
    /// Minterms covered by `dc` but not by `on` are don't-cares.
    pub fn from_cover(on: &Cover, dc: Option<&Cover>) -> Result<Self> {
        if let Some(dc) = dc {
            if dc.arity() != on.arity() {
                return Err(Error::arity_mismatch(on.arity(), dc.arity()));
            }
        }
        Self::from_fn(on.arity(), |index| {
            if on.evaluate(index) {
                Literal::One
            } else if dc.map_or(false, |dc| dc.evaluate(index)) {
                Literal::DontCare
            } else {
                Literal::Zero
            }
        })
    }

    fn from_table(arity: usize, table: Vec<Literal>) -> Self {
        debug_assert_eq!(table.len(), 1 << arity);
        Self {
            arity,
            table,
            cache: FuncCache::default(),
        }
    }

    /// Returns `2^arity`, or an error if `arity` is above [`MAX_INPUTS`](Self::MAX_INPUTS).
    pub(crate) fn assignment_count(arity: usize) -> Result<u32> {
        if arity > Self::MAX_INPUTS {
            return Err(Error::ArityTooLarge {
                arity,
                max: Self::MAX_INPUTS,
            });
        }
        Ok(1 << arity)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn table(&self) -> &[Literal] {
        &self.table
    }

    /// Returns the value at assignment `index`, or `None` if it is out of range.
    #[inline]
    pub fn value(&self, index: u32) -> Option<Literal> {
        self.table.get(index as usize).copied()
    }

    /// Returns the value at the assignment given as one bool per input.
    pub fn value_of(&self, inputs: &[bool]) -> Result<Literal> {
        if inputs.len() != self.arity {
            return Err(Error::arity_mismatch(self.arity, inputs.len()));
        }
        let index = inputs
            .iter()
            .enumerate()
            .filter(|(_, &value)| value)
            .fold(0_usize, |acc, (var, _)| acc | (1 << var));
        Ok(self.table[index])
    }

    /// Sets the value at assignment `index`, invalidating derived minterm sets.
    pub fn set_value(&mut self, index: u32, value: Literal) -> Result<()> {
        let nelem = self.table.len();
        let slot = self
            .table
            .get_mut(index as usize)
            .ok_or(Error::ElementOutOfRange {
                element: index as usize,
                nelem,
            })?;
        if *slot != value {
            *slot = value;
            self.cache.invalidate();
        }
        Ok(())
    }

    /// Returns the on-, don't-care- and off-sets. Computed once and cached.
    #[inline]
    pub fn minterms(&self) -> &MintermSets {
        self.cache.get_or_init_minterms(&self.table)
    }

    #[inline]
    pub fn on_set(&self) -> &[u32] {
        self.minterms().on_set()
    }

    #[inline]
    pub fn dc_set(&self) -> &[u32] {
        self.minterms().dc_set()
    }

    #[inline]
    pub fn off_set(&self) -> &[u32] {
        self.minterms().off_set()
    }

    pub fn is_completely_specified(&self) -> bool {
        self.dc_set().is_empty()
    }

    pub fn invert(&self) -> Self {
        let table = self.table.iter().map(|literal| literal.invert()).collect();
        Self::from_table(self.arity, table)
    }

    pub fn and(&self, other: &Self) -> Result<Self> {
        self.pointwise(other, Literal::and)
    }

    pub fn or(&self, other: &Self) -> Result<Self> {
        self.pointwise(other, Literal::or)
    }

    pub fn xor(&self, other: &Self) -> Result<Self> {
        self.pointwise(other, Literal::xor)
    }

    /// Replaces input `i` of this function with `inputs[i]`.
    ///
    /// All input functions must share one arity, which becomes the arity of the
    /// result. Where some `inputs[i]` is a don't-care, the result is defined only if
    /// this function takes the same value for both choices.
    pub fn compose(&self, inputs: &[BoolFunc]) -> Result<Self> {
        if inputs.len() != self.arity {
            return Err(Error::arity_mismatch(self.arity, inputs.len()));
        }
        let arity = inputs.first().map_or(0, |first| first.arity);
        if let Some(mismatched) = inputs.iter().find(|input| input.arity != arity) {
            return Err(Error::arity_mismatch(arity, mismatched.arity));
        }

        let size = Self::assignment_count(arity)?;
        let mut table = Vec::with_capacity(size as usize);
        for index in 0..size as usize {
            let point = Cube::new(inputs.iter().map(|input| input.table[index]))?;
            table.push(self.value_over(&point));
        }
        Ok(Self::from_table(arity, table))
    }

    /// Replaces input `var` with `func`, a function over the same inputs.
    pub fn substitute(&self, var: usize, func: &BoolFunc) -> Result<Self> {
        if var >= self.arity {
            return Err(Error::ElementOutOfRange {
                element: var,
                nelem: self.arity,
            });
        }
        if func.arity != self.arity {
            return Err(Error::arity_mismatch(self.arity, func.arity));
        }
        let inputs = (0..self.arity)
            .map(|input| {
                if input == var {
                    Ok(func.clone())
                } else {
                    Self::literal(self.arity, input)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        self.compose(&inputs)
    }

    // The common value over every assignment in `cube`, or don't-care if they differ.
    fn value_over(&self, cube: &Cube) -> Literal {
        let mut values = cube.minterms().map(|index| self.table[index as usize]);
        match values.next() {
            Some(first) if values.all(|value| value == first) => first,
            _ => Literal::DontCare,
        }
    }

    fn pointwise(&self, other: &Self, op: impl Fn(Literal, Literal) -> Literal) -> Result<Self> {
        if self.arity != other.arity {
            return Err(Error::arity_mismatch(self.arity, other.arity));
        }
        let table = self
            .table
            .iter()
            .zip(&other.table)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Self::from_table(self.arity, table))
    }
}

// Assigns a literal to every listed minterm, rejecting out-of-range minterms and
// minterms listed with two different values.
fn assign_minterms(arity: usize, sets: &[(&[u32], Literal)]) -> Result<Vec<Option<Literal>>> {
    let size = BoolFunc::assignment_count(arity)?;
    let mut slots = vec![None; size as usize];
    for &(minterms, literal) in sets {
        for &index in minterms {
            let slot = slots.get_mut(index as usize).ok_or_else(|| {
                Error::inconsistent(format!(
                    "minterm {} is out of range for {} inputs",
                    index, arity
                ))
            })?;
            if let Some(prev) = *slot {
                if prev != literal {
                    return Err(Error::inconsistent(format!(
                        "minterm {} is assigned both {} and {}",
                        index, prev, literal
                    )));
                }
            }
            *slot = Some(literal);
        }
    }
    Ok(slots)
}

impl PartialEq for BoolFunc {
    fn eq(&self, other: &Self) -> bool {
        self.arity == other.arity && self.table == other.table
    }
}

impl Eq for BoolFunc {}

/// Writes the truth table in the format accepted by [`BoolFunc::from_pattern`].
impl fmt::Display for BoolFunc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for literal in &self.table {
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BoolFunc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("BoolFunc")
            .field(&self.arity)
            .field(&format_args!("{}", self))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn func(arity: usize, pattern: &str) -> BoolFunc {
        BoolFunc::from_pattern(arity, pattern).unwrap()
    }

    #[test]
    fn test_gates() {
        assert_eq!(BoolFunc::and_of(2).unwrap().to_string(), "0001");
        assert_eq!(BoolFunc::or_of(2).unwrap().to_string(), "0111");
        assert_eq!(BoolFunc::xor_of(2).unwrap().to_string(), "0110");
        assert_eq!(BoolFunc::nand_of(2).unwrap().to_string(), "1110");
        assert_eq!(BoolFunc::nor_of(2).unwrap().to_string(), "1000");
        assert_eq!(BoolFunc::xnor_of(2).unwrap().to_string(), "1001");
        assert_eq!(BoolFunc::literal(2, 0).unwrap().to_string(), "0101");
        assert_eq!(BoolFunc::const1(1).unwrap().to_string(), "11");
        assert_eq!(BoolFunc::new(1).unwrap().to_string(), "00");
        assert!(BoolFunc::literal(2, 2).is_err());
        assert!(matches!(
            BoolFunc::const0(21),
            Err(Error::ArityTooLarge { arity: 21, .. })
        ));
        assert_eq!(format!("{:?}", func(1, "1-")), "BoolFunc(1, 1-)");
    }

    #[test]
    fn test_from_values() {
        assert_eq!(
            BoolFunc::from_values(2, vec![Literal::One; 3]),
            Err(Error::ArityMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            BoolFunc::from_pattern(1, "0z"),
            Err(Error::InvalidLiteral { .. })
        ));
    }

    #[test]
    fn test_from_minterms() {
        let f = BoolFunc::from_minterms(2, &[1], &[2], &[0, 3]).unwrap();
        assert_eq!(f, func(2, "01-0"));
        assert_eq!(f.on_set(), &[1]);
        assert_eq!(f.dc_set(), &[2]);
        assert_eq!(f.off_set(), &[0, 3]);
        let on_or_dc: Vec<u32> = f.minterms().on_or_dc().collect();
        assert_eq!(on_or_dc, vec![1, 2]);
        assert!(!f.is_completely_specified());

        // Missing minterm 3.
        assert!(matches!(
            BoolFunc::from_minterms(2, &[1], &[2], &[0]),
            Err(Error::InconsistentSpecification(_))
        ));
        // Minterm 1 in both the on-set and the off-set.
        assert!(matches!(
            BoolFunc::from_minterms(2, &[1], &[2], &[0, 1, 3]),
            Err(Error::InconsistentSpecification(_))
        ));
        // Out of range.
        assert!(matches!(
            BoolFunc::from_minterms(2, &[1, 4], &[2], &[0, 3]),
            Err(Error::InconsistentSpecification(_))
        ));

        assert_eq!(BoolFunc::from_on_dc(2, &[1, 2], &[3]).unwrap(), func(2, "011-"));
        assert!(BoolFunc::from_on_dc(2, &[1, 2], &[2]).is_err());
    }

    #[test]
    fn test_from_cover() {
        let on = Cover::from_patterns(2, ["1-"]).unwrap();
        let dc = Cover::from_patterns(2, ["01", "11"]).unwrap();
        assert_eq!(BoolFunc::from_cover(&on, Some(&dc)).unwrap(), func(2, "01-1"));
        assert_eq!(BoolFunc::from_cover(&on, None).unwrap(), func(2, "0101"));
        let wrong = Cover::with_arity(3);
        assert!(BoolFunc::from_cover(&on, Some(&wrong)).is_err());
    }

    #[test]
    fn test_set_value_invalidates_cache() {
        let mut f = BoolFunc::const0(2).unwrap();
        assert!(f.on_set().is_empty());
        f.set_value(3, Literal::One).unwrap();
        assert_eq!(f.on_set(), &[3]);
        assert_eq!(f.off_set(), &[0, 1, 2]);
        f.set_value(0, Literal::DontCare).unwrap();
        assert_eq!(f.dc_set(), &[0]);
        assert_eq!(
            f.set_value(4, Literal::One),
            Err(Error::ElementOutOfRange {
                element: 4,
                nelem: 4
            })
        );
    }

    #[test]
    fn test_value_of() {
        let and = BoolFunc::and_of(3).unwrap();
        assert_eq!(and.value_of(&[true, true, true]), Ok(Literal::One));
        assert_eq!(and.value_of(&[true, false, true]), Ok(Literal::Zero));
        assert!(and.value_of(&[true]).is_err());
        assert_eq!(and.value(7), Some(Literal::One));
        assert_eq!(and.value(8), None);
    }

    #[test]
    fn test_pointwise() {
        let a = func(2, "01-1");
        let b = func(2, "0011");
        assert_eq!(a.and(&b).unwrap(), func(2, "00-1"));
        assert_eq!(a.or(&b).unwrap(), func(2, "0111"));
        assert_eq!(a.xor(&b).unwrap(), func(2, "01-0"));
        assert_eq!(a.invert(), func(2, "10-0"));
        assert!(a.and(&func(1, "01")).is_err());
    }

    #[test]
    fn test_compose() {
        // ab' with its inputs swapped is a'b.
        let f = func(2, "0100");
        let swapped = [
            BoolFunc::literal(2, 1).unwrap(),
            BoolFunc::literal(2, 0).unwrap(),
        ];
        assert_eq!(f.compose(&swapped).unwrap(), func(2, "0010"));

        // A don't-care input makes the result a don't-care only if it matters.
        let and = BoolFunc::and_of(2).unwrap();
        let inputs = [func(1, "0-"), BoolFunc::const1(1).unwrap()];
        assert_eq!(and.compose(&inputs).unwrap(), func(1, "0-"));
        let or = BoolFunc::or_of(2).unwrap();
        let inputs = [func(1, "--"), BoolFunc::const1(1).unwrap()];
        assert_eq!(or.compose(&inputs).unwrap(), func(1, "11"));

        assert!(and.compose(&[func(1, "01")]).is_err());
        assert!(and.compose(&[func(1, "01"), func(2, "0101")]).is_err());
    }

    #[test]
    fn test_substitute() {
        let and = BoolFunc::and_of(2).unwrap();
        let a = BoolFunc::literal(2, 0).unwrap();
        // a * a' = 0
        assert_eq!(
            and.substitute(1, &a.invert()).unwrap(),
            BoolFunc::const0(2).unwrap()
        );
        // (a + b) * b = b
        let or = BoolFunc::or_of(2).unwrap();
        assert_eq!(
            and.substitute(0, &or).unwrap(),
            BoolFunc::literal(2, 1).unwrap()
        );
        assert!(and.substitute(2, &or).is_err());
        assert!(and.substitute(0, &func(1, "01")).is_err());
    }
}
