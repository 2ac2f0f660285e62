// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::literal::Literal;
use once_cell::sync::OnceCell;

/// Cache for data derived from a truth table.
#[derive(Clone, Debug, Default)]
pub(super) struct FuncCache {
    minterms: OnceCell<MintermSets>,
}

impl FuncCache {
    pub(super) fn invalidate(&mut self) {
        self.minterms = OnceCell::new();
    }

    pub(super) fn get_or_init_minterms(&self, table: &[Literal]) -> &MintermSets {
        self.minterms.get_or_init(|| MintermSets::new(table))
    }
}

/// The on-set, don't-care-set and off-set of a function, as sorted minterm indices.
///
/// The three sets partition `0..2^n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintermSets {
    on: Vec<u32>,
    dc: Vec<u32>,
    off: Vec<u32>,
}

impl MintermSets {
    fn new(table: &[Literal]) -> Self {
        let mut on = vec![];
        let mut dc = vec![];
        let mut off = vec![];
        for (index, literal) in (0_u32..).zip(table) {
            match literal {
                Literal::One => on.push(index),
                Literal::DontCare => dc.push(index),
                Literal::Zero => off.push(index),
            }
        }
        Self { on, dc, off }
    }

    #[inline]
    pub fn on_set(&self) -> &[u32] {
        &self.on
    }

    #[inline]
    pub fn dc_set(&self) -> &[u32] {
        &self.dc
    }

    #[inline]
    pub fn off_set(&self) -> &[u32] {
        &self.off
    }

    /// The on-set followed by the don't-care-set: the minterms a prime may cover.
    pub fn on_or_dc(&self) -> impl Iterator<Item = u32> + '_ {
        self.on.iter().chain(&self.dc).copied()
    }
}
