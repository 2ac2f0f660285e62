// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    boolfunc::BoolFunc,
    errors::{Error, Result, SymbolKind},
    fsm::Fsm,
    literal::Literal,
};
use log::debug;
use std::collections::HashSet;

/// Binary codes for one kind of symbol: code `i` is assigned to symbol `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoding {
    width: usize,
    codes: Vec<u32>,
}

impl Encoding {
    /// Creates an encoding where every code fits in `width` bits.
    pub fn new(width: usize, codes: Vec<u32>) -> Result<Self> {
        if width > 32 {
            return Err(Error::ArityTooLarge {
                arity: width,
                max: 32,
            });
        }
        if let Some(code) = codes.iter().find(|&&code| width < 32 && code >> width != 0) {
            return Err(Error::inconsistent(format!(
                "code {:#b} does not fit in {} bits",
                code, width
            )));
        }
        Ok(Self { width, codes })
    }

    /// Parses codes such as `"01"`, where character `b` is bit `b` of the code.
    pub fn from_patterns<I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut width = None;
        let mut codes = vec![];
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let len = pattern.chars().count();
            if let Some(width) = width {
                if width != len {
                    return Err(Error::arity_mismatch(width, len));
                }
            }
            width = Some(len);
            let mut code = 0;
            for (bit, ch) in pattern.chars().enumerate() {
                match ch {
                    '0' => {}
                    '1' if bit < 32 => code |= 1 << bit,
                    _ => {
                        return Err(Error::InvalidLiteral {
                            value: ch.to_string(),
                        })
                    }
                }
            }
            codes.push(code);
        }
        Self::new(width.unwrap_or(0), codes)
    }

    /// Natural binary codes for `count` symbols, in the fewest bits that fit.
    pub fn binary(count: usize) -> Self {
        let mut width = 0;
        while (1_usize << width) < count {
            width += 1;
        }
        Self {
            width,
            codes: (0..count as u32).collect(),
        }
    }

    /// One bit per symbol.
    pub fn one_hot(count: usize) -> Result<Self> {
        let codes = (0..count).map(|ix| 1_u32.checked_shl(ix as u32).unwrap_or(0)).collect();
        Self::new(count, codes)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn code(&self, ix: usize) -> Option<u32> {
        self.codes.get(ix).copied()
    }

    fn check_distinct(&self, kind: SymbolKind) -> Result<()> {
        let mut seen = HashSet::new();
        for &code in &self.codes {
            if !seen.insert(code) {
                return Err(Error::inconsistent(format!(
                    "two {}s share the code {:#b}",
                    kind, code
                )));
            }
        }
        Ok(())
    }

    fn check_len(&self, expected: usize) -> Result<()> {
        if self.codes.len() == expected {
            Ok(())
        } else {
            Err(Error::arity_mismatch(expected, self.codes.len()))
        }
    }
}

/// Codes for the states, inputs and outputs of a machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsmEncoding {
    pub states: Encoding,
    pub inputs: Encoding,
    pub outputs: Encoding,
}

impl FsmEncoding {
    pub fn new(states: Encoding, inputs: Encoding, outputs: Encoding) -> Self {
        Self {
            states,
            inputs,
            outputs,
        }
    }

    /// Natural binary codes for everything in `fsm`.
    pub fn binary(fsm: &Fsm) -> Self {
        Self {
            states: Encoding::binary(fsm.state_count()),
            inputs: Encoding::binary(fsm.input_count()),
            outputs: Encoding::binary(fsm.output_count()),
        }
    }

    /// The number of inputs of the extracted functions.
    #[inline]
    pub fn arity(&self) -> usize {
        self.states.width + self.inputs.width
    }
}

/// The next-state and output functions of an encoded machine.
///
/// Every function has the inputs `[state bits.., input bits..]`: variable `b` is state
/// bit `b`, and variable `states.width() + b` is input bit `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedFunctions {
    /// One function per state bit.
    pub next_state: Vec<BoolFunc>,
    /// One function per output bit.
    pub outputs: Vec<BoolFunc>,
}

impl Fsm {
    /// Builds the next-state and output functions of this machine under `encoding`.
    ///
    /// Code points that no (state, input) pair maps to are don't-cares. State and
    /// input codes must be distinct.
    pub fn extract_functions(&self, encoding: &FsmEncoding) -> Result<ExtractedFunctions> {
        encoding.states.check_len(self.state_count())?;
        encoding.inputs.check_len(self.input_count())?;
        encoding.outputs.check_len(self.output_count())?;
        encoding.states.check_distinct(SymbolKind::State)?;
        encoding.inputs.check_distinct(SymbolKind::Input)?;

        let arity = encoding.arity();
        let size = BoolFunc::assignment_count(arity)? as usize;
        let state_width = encoding.states.width;
        let mut next_state = vec![vec![Literal::DontCare; size]; state_width];
        let mut outputs = vec![vec![Literal::DontCare; size]; encoding.outputs.width];

        for (state, &state_code) in encoding.states.codes.iter().enumerate() {
            for (input, &input_code) in encoding.inputs.codes.iter().enumerate() {
                let index = (state_code | input_code << state_width) as usize;
                let (next, output) = self.transition_ix(state, input);
                set_bits(&mut next_state, index, encoding.states.codes[next]);
                set_bits(&mut outputs, index, encoding.outputs.codes[output]);
            }
        }
        debug!(
            "extracted {} next-state and {} output functions over {} inputs",
            next_state.len(),
            outputs.len(),
            arity
        );

        let to_funcs = |tables: Vec<Vec<Literal>>| {
            tables
                .into_iter()
                .map(|table| BoolFunc::from_values(arity, table))
                .collect::<Result<Vec<_>>>()
        };
        Ok(ExtractedFunctions {
            next_state: to_funcs(next_state)?,
            outputs: to_funcs(outputs)?,
        })
    }
}

fn set_bits(tables: &mut [Vec<Literal>], index: usize, code: u32) {
    for (bit, table) in tables.iter_mut().enumerate() {
        table[index] = Literal::from((code >> bit) & 1 == 1);
    }
}
