// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    details::{FunctionSummary, MachineSummary},
    value_generator::ValueGenerator,
};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::eyre, Result};
use log::debug;
use logic_lab::{
    boolfunc::BoolFunc,
    fsm::FsmEncoding,
    minimize::CostMetric,
    proptest_helpers::{bool_func_strategy, fsm_strategy},
};
use once_cell::sync::Lazy;
use proptest::{collection::vec, prelude::*};
use std::fmt::Write;

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
        let dir = manifest_dir.parent().unwrap_or(manifest_dir).join("data");
        Self { dir }
    }

    /// The directory fixture files are written to.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Minimizes `count` random functions of up to `max_arity` inputs and checks every
    /// minimum cover against its function.
    pub fn check_functions(count: usize, max_arity: usize, seed: &str) -> Result<FunctionSummary> {
        check_max_arity(max_arity)?;
        let mut value_gen = ValueGenerator::from_seed(seed);
        let mut summary = FunctionSummary::default();

        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let func = gen.generate((0..=max_arity).prop_flat_map(bool_func_strategy));
            let primes = func.prime_implicants()?;
            let covers = func.minimize_all_with(CostMetric::default())?;
            let cover = func.minimize()?;

            if !cover.agrees_with(&func)? {
                return Err(eyre!("function {} ({}): cover {:?} disagrees", ix, func, cover));
            }
            if !covers.contains(&cover) {
                return Err(eyre!(
                    "function {} ({}): cover {:?} is not among the minimum covers",
                    ix,
                    func,
                    cover
                ));
            }
            debug!(
                "function {} ({}): {} primes, {} minimum covers",
                ix,
                func,
                primes.cube_count(),
                covers.len()
            );

            summary.checked += 1;
            summary.primes += primes.cube_count();
            summary.cubes += cover.cube_count();
            summary.literals += cover.literal_count();
            if covers.len() > 1 {
                summary.ambiguous += 1;
            }
        }

        Ok(summary)
    }

    /// Minimizes `count` random machines, checks that every state behaves like its
    /// image on random input sequences, and minimizes the extracted logic.
    pub fn check_machines(count: usize, seed: &str) -> Result<MachineSummary> {
        let mut value_gen = ValueGenerator::from_seed(seed);
        let mut summary = MachineSummary::default();

        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let fsm = gen.generate(fsm_strategy(8, 3, 3));
            let minimized = fsm.minimize();

            for _ in 0..8 {
                let sequence = gen.generate(vec(any::<prop::sample::Index>(), 0..16));
                let inputs: Vec<usize> = sequence
                    .iter()
                    .map(|input| input.index(fsm.input_count()))
                    .collect();
                for start in 0..fsm.state_count() {
                    let expected = fsm.run(start, &inputs)?;
                    let actual = minimized.fsm.run(minimized.state_map[start], &inputs)?;
                    if expected != actual {
                        return Err(eyre!(
                            "machine {}: state {} diverges from its image on {:?}",
                            ix,
                            fsm.states()[start],
                            inputs
                        ));
                    }
                }
            }

            let funcs = minimized
                .fsm
                .extract_functions(&FsmEncoding::binary(&minimized.fsm))?;
            for func in funcs.next_state.iter().chain(&funcs.outputs) {
                summary.logic_cubes += func.minimize()?.cube_count();
            }
            debug!(
                "machine {}: {} states reduced to {}",
                ix,
                fsm.state_count(),
                minimized.fsm.state_count()
            );

            summary.checked += 1;
            summary.states_before += fsm.state_count();
            summary.states_after += minimized.fsm.state_count();
            summary.refinement_steps += minimized.table.step_count();
        }

        Ok(summary)
    }

    /// Writes `count` random functions with one minimum cover each, one per line, to
    /// `functions-<seed>.txt` in the fixture directory.
    pub fn write_functions(
        &self,
        count: usize,
        max_arity: usize,
        seed: &str,
    ) -> Result<Utf8PathBuf> {
        check_max_arity(max_arity)?;
        let mut value_gen = ValueGenerator::from_seed(seed);
        let mut out = String::new();
        for _ in 0..count {
            let mut gen = value_gen.partial_clone();
            let func = gen.generate((0..=max_arity).prop_flat_map(bool_func_strategy));
            let cover = func.minimize()?;
            writeln!(
                out,
                "{} {} {}",
                func.arity(),
                func,
                cover.matrix_display().with_cube_separator(",", false)
            )?;
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("functions-{}.txt", seed));
        std::fs::write(&path, out)?;
        debug!("wrote {} functions to {}", count, path);
        Ok(path)
    }
}

fn check_max_arity(max_arity: usize) -> Result<()> {
    if max_arity > BoolFunc::MAX_INPUTS {
        return Err(eyre!(
            "max arity {} exceeds the supported maximum of {}",
            max_arity,
            BoolFunc::MAX_INPUTS
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_functions() {
        let summary = AllFixtures::check_functions(8, 3, "fixtures").unwrap();
        assert_eq!(summary.checked, 8);
        assert!(summary.cubes <= summary.primes);

        // Same seed, same functions.
        let again = AllFixtures::check_functions(8, 3, "fixtures").unwrap();
        assert_eq!(summary, again);
    }

    #[test]
    fn test_check_machines() {
        let summary = AllFixtures::check_machines(8, "fixtures").unwrap();
        assert_eq!(summary.checked, 8);
        assert!(summary.states_after <= summary.states_before);
        assert!(summary.refinement_steps >= summary.checked);
    }

    #[test]
    fn test_max_arity_is_checked() {
        let max = BoolFunc::MAX_INPUTS;
        assert!(AllFixtures::check_functions(1, max + 1, "fixtures").is_err());
        let fixtures = AllFixtures::get();
        assert!(fixtures.write_functions(1, max + 1, "fixtures").is_err());
    }
}
