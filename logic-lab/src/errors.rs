// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types returned by the public operations of this crate.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the cube algebra, the minimizers and the FSM model.
///
/// All of these describe malformed input; none of them are transient.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Two values of differing input width were combined.
    #[error("arity mismatch: expected {expected}, found {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The requested input width is larger than the representation supports.
    #[error("arity {arity} exceeds the maximum of {max}")]
    ArityTooLarge { arity: usize, max: usize },

    /// A value outside {0, 1, don't-care} was supplied where a literal is required.
    #[error("invalid literal: {value}")]
    InvalidLiteral { value: String },

    /// A set-cover element is covered by no clause.
    #[error("unsatisfiable cover: element {element} is not covered by any clause")]
    UnsatisfiableCover { element: usize },

    /// An index (a set-cover element or a minterm) lies outside `0..nelem`.
    #[error("index {element} out of range (expected less than {nelem})")]
    ElementOutOfRange { element: usize, nelem: usize },

    /// An FSM has no transition registered for this state/input pair.
    #[error("no transition defined for state `{state}` on input `{input}`")]
    UndefinedTransition { state: String, input: String },

    /// An FSM transition was registered twice.
    #[error("transition for state `{state}` on input `{input}` is already defined")]
    DuplicateTransition { state: String, input: String },

    /// An FSM state, input or output name is not part of the machine.
    #[error("unknown {kind} `{name}`")]
    UnknownSymbol { kind: SymbolKind, name: String },

    /// On-set, off-set and don't-care-set (or an encoding) are not consistent.
    #[error("inconsistent specification: {0}")]
    InconsistentSpecification(String),
}

impl Error {
    #[inline]
    pub(crate) fn arity_mismatch(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    #[inline]
    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Self::InconsistentSpecification(message.into())
    }
}

/// The kind of name an [`Error::UnknownSymbol`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    State,
    Input,
    Output,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}
