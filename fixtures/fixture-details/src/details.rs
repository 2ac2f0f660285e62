// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// Totals from checking random functions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionSummary {
    pub checked: usize,
    pub primes: usize,
    pub cubes: usize,
    pub literals: usize,
    /// Functions with more than one minimum cover.
    pub ambiguous: usize,
}

impl fmt::Display for FunctionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} functions: {} primes, {} cubes and {} literals in minimum covers, \
             {} with several minimum covers",
            self.checked, self.primes, self.cubes, self.literals, self.ambiguous
        )
    }
}

/// Totals from checking random machines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachineSummary {
    pub checked: usize,
    pub states_before: usize,
    pub states_after: usize,
    pub refinement_steps: usize,
    /// Cubes over all minimized next-state and output functions.
    pub logic_cubes: usize,
}

impl fmt::Display for MachineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} machines: {} states reduced to {} in {} refinement steps, {} cubes of logic",
            self.checked,
            self.states_before,
            self.states_after,
            self.refinement_steps,
            self.logic_cubes
        )
    }
}
