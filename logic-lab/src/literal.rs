// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::Error;
use std::fmt;

/// A tri-valued literal: 0, 1 or don't-care.
///
/// `DontCare` is the top element of the algebra. `Zero` and `One` are incomparable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literal {
    Zero,
    One,
    DontCare,
}

impl Literal {
    pub const ALL: [Literal; 3] = [Literal::Zero, Literal::One, Literal::DontCare];

    #[inline]
    pub fn is_defined(self) -> bool {
        !matches!(self, Self::DontCare)
    }

    #[inline]
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::DontCare => None,
        }
    }

    /// Three-valued negation. Don't-care stays don't-care.
    pub fn invert(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
            Self::DontCare => Self::DontCare,
        }
    }

    /// Three-valued AND: a defined 0 dominates, otherwise unknown inputs give don't-care.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Zero, _) | (_, Self::Zero) => Self::Zero,
            (Self::One, Self::One) => Self::One,
            _ => Self::DontCare,
        }
    }

    /// Three-valued OR: a defined 1 dominates, otherwise unknown inputs give don't-care.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::One, _) | (_, Self::One) => Self::One,
            (Self::Zero, Self::Zero) => Self::Zero,
            _ => Self::DontCare,
        }
    }

    pub fn xor(self, other: Self) -> Self {
        match (self.to_bool(), other.to_bool()) {
            (Some(a), Some(b)) => Self::from(a ^ b),
            _ => Self::DontCare,
        }
    }

    /// Returns true if every value `other` admits is also admitted by `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self == Self::DontCare || self == other
    }

    /// Returns true if `self` and `other` are opposite defined values.
    #[inline]
    pub fn is_complement_of(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Zero, Self::One) | (Self::One, Self::Zero)
        )
    }

    /// Returns the character used for this literal in cube patterns.
    pub fn to_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::DontCare => '-',
        }
    }
}

impl Default for Literal {
    fn default() -> Self {
        Self::DontCare
    }
}

impl From<bool> for Literal {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Self::One
        } else {
            Self::Zero
        }
    }
}

impl From<Option<bool>> for Literal {
    #[inline]
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::DontCare,
        }
    }
}

impl From<Literal> for Option<bool> {
    #[inline]
    fn from(literal: Literal) -> Self {
        literal.to_bool()
    }
}

/// Uses the numeric representation in the Espresso book: 0, 1, and 2 for don't-care.
impl TryFrom<u8> for Literal {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::DontCare),
            _ => Err(Error::InvalidLiteral {
                value: value.to_string(),
            }),
        }
    }
}

impl TryFrom<char> for Literal {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '0' => Ok(Self::Zero),
            '1' => Ok(Self::One),
            '-' | '*' | 'd' | 'x' => Ok(Self::DontCare),
            _ => Err(Error::InvalidLiteral {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_tables() {
        use Literal::*;

        assert_eq!(Zero.and(DontCare), Zero);
        assert_eq!(One.and(DontCare), DontCare);
        assert_eq!(One.and(One), One);
        assert_eq!(One.or(DontCare), One);
        assert_eq!(Zero.or(DontCare), DontCare);
        assert_eq!(Zero.or(Zero), Zero);
        assert_eq!(One.xor(One), Zero);
        assert_eq!(One.xor(Zero), One);
        assert_eq!(One.xor(DontCare), DontCare);
        assert_eq!(DontCare.invert(), DontCare);
        assert_eq!(Zero.invert(), One);
    }

    #[test]
    fn test_containment() {
        for literal in Literal::ALL {
            assert!(Literal::DontCare.contains(literal));
            assert!(literal.contains(literal));
        }
        assert!(!Literal::Zero.contains(Literal::One));
        assert!(!Literal::One.contains(Literal::DontCare));
        assert!(Literal::Zero.is_complement_of(Literal::One));
        assert!(!Literal::Zero.is_complement_of(Literal::DontCare));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Literal::try_from(2_u8), Ok(Literal::DontCare));
        assert!(matches!(
            Literal::try_from(3_u8),
            Err(Error::InvalidLiteral { .. })
        ));
        assert_eq!(Literal::try_from('*'), Ok(Literal::DontCare));
        assert!(Literal::try_from('z').is_err());
        assert_eq!(Literal::from(Some(true)), Literal::One);
        assert_eq!(Option::<bool>::from(Literal::DontCare), None);
    }
}
