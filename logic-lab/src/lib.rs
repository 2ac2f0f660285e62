// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tools for teaching digital logic: cube and cover algebra, exact two-level
//! minimization, and finite-state machine minimization.

pub mod boolfunc;
pub mod cover;
pub mod cube;
pub mod errors;
pub mod fsm;
pub mod literal;
pub mod mincov;
pub mod minimize;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
