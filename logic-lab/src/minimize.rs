// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact two-level minimization: prime implicants followed by a minimum cover.

use crate::{boolfunc::BoolFunc, cover::Cover, cube::Cube, errors::Result, mincov::MinCov};
use log::debug;

/// What a minimum cover minimizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CostMetric {
    /// The number of cubes.
    CubeCount,

    /// The total number of literals.
    LiteralCount,

    /// The number of cubes, with ties broken by the total number of literals.
    CubesThenLiterals,
}

impl Default for CostMetric {
    fn default() -> Self {
        Self::CubesThenLiterals
    }
}

impl CostMetric {
    // `per_cube` must exceed the literal count of any selection of primes, so that one
    // cube always outweighs any difference in literals.
    fn weight(self, prime: &Cube, per_cube: u32) -> u32 {
        let literals = prime.literal_count() as u32;
        match self {
            Self::CubeCount => 1,
            // Only the universe cube has no literals, and then it is the only prime.
            Self::LiteralCount => literals.max(1),
            Self::CubesThenLiterals => per_cube + literals,
        }
    }
}

impl BoolFunc {
    /// Returns a minimum sum-of-products cover of this function under
    /// [`CostMetric::CubesThenLiterals`].
    ///
    /// The cover is 1 on the on-set and 0 on the off-set. Both prime generation and the
    /// cover search are exponential in the worst case.
    pub fn minimize(&self) -> Result<Cover> {
        self.minimize_with(CostMetric::default())
    }

    pub fn minimize_with(&self, metric: CostMetric) -> Result<Cover> {
        let (primes, mincov) = self.cover_problem(metric)?;
        let selection = mincov.solve()?;
        Ok(select_primes(&primes, &selection))
    }

    /// Returns every minimum cover of this function under `metric`.
    pub fn minimize_all_with(&self, metric: CostMetric) -> Result<Vec<Cover>> {
        let (primes, mincov) = self.cover_problem(metric)?;
        let selections = mincov.all_cover()?;
        Ok(selections
            .iter()
            .map(|selection| select_primes(&primes, selection))
            .collect())
    }

    // Elements are on-set minterms, clauses are primes.
    fn cover_problem(&self, metric: CostMetric) -> Result<(Cover, MinCov)> {
        let primes = self.prime_implicants()?;
        let on_set = self.on_set();
        debug!(
            "minimizing {}-input function: {} on-set minterms, {} primes, {:?}",
            self.arity(),
            on_set.len(),
            primes.cube_count(),
            metric
        );

        // At most 2^20 * 20, so this fits.
        let per_cube = (primes.cube_count().min(on_set.len()) * self.arity() + 1) as u32;
        let mut mincov = MinCov::new(on_set.len());
        for prime in &primes {
            let elements: Vec<usize> = on_set
                .iter()
                .enumerate()
                .filter(|(_, &minterm)| prime.evaluate(minterm))
                .map(|(element, _)| element)
                .collect();
            mincov.add_clause_with_cost(&elements, metric.weight(prime, per_cube))?;
        }
        Ok((primes, mincov))
    }
}

/// Minimizes each function independently.
pub fn minimize_each(funcs: &[BoolFunc], metric: CostMetric) -> Result<Vec<Cover>> {
    funcs.iter().map(|func| func.minimize_with(metric)).collect()
}

fn select_primes(primes: &Cover, selection: &[usize]) -> Cover {
    let mut cover = Cover::with_arity(primes.arity());
    for &id in selection {
        cover.insert_unchecked(primes.elements()[id].clone());
    }
    cover
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literal::Literal, proptest_helpers::bool_func_strategy};
    use itertools::Itertools;
    use proptest::prelude::*;
    use test_log::test;

    #[test]
    fn test_lsb_function() {
        let func = BoolFunc::from_on_dc(3, &[1, 3, 5, 7], &[]).unwrap();
        let cover = func.minimize().unwrap();
        assert_eq!(cover, Cover::from_patterns(3, ["1--"]).unwrap());
        assert_eq!(format!("{}", cover.algebraic_display()), "a");
    }

    #[test]
    fn test_constants() {
        assert!(BoolFunc::const0(3).unwrap().minimize().unwrap().is_empty());
        assert_eq!(
            BoolFunc::const1(3).unwrap().minimize().unwrap(),
            Cover::new(3, [Cube::universe(3).unwrap()]).unwrap()
        );
        let all_dc = BoolFunc::from_pattern(2, "----").unwrap();
        assert!(all_dc.minimize().unwrap().is_empty());
        let mostly_dc = BoolFunc::from_pattern(2, "-1--").unwrap();
        assert_eq!(
            mostly_dc.minimize().unwrap(),
            Cover::new(2, [Cube::universe(2).unwrap()]).unwrap()
        );
    }

    #[test]
    fn test_cyclic_function_has_two_minimum_covers() {
        let func = BoolFunc::from_on_dc(3, &[0, 1, 2, 5, 6, 7], &[]).unwrap();
        let covers = func.minimize_all_with(CostMetric::CubeCount).unwrap();
        assert_eq!(covers.len(), 2);
        assert!(covers.contains(&Cover::from_patterns(3, ["-00", "01-", "1-1"]).unwrap()));
        assert!(covers.contains(&Cover::from_patterns(3, ["0-0", "10-", "-11"]).unwrap()));

        let cover = func.minimize().unwrap();
        assert!(covers.contains(&cover));
    }

    #[test]
    fn test_minimize_each() {
        let funcs = [BoolFunc::and_of(2).unwrap(), BoolFunc::xor_of(2).unwrap()];
        let covers = minimize_each(&funcs, CostMetric::default()).unwrap();
        assert_eq!(covers[0], Cover::from_patterns(2, ["11"]).unwrap());
        assert_eq!(covers[1], Cover::from_patterns(2, ["10", "01"]).unwrap());
    }

    // The smallest (cubes, literals) over every cover built from `candidates`.
    fn brute_force_minimum(func: &BoolFunc, candidates: &[Cube]) -> (usize, usize) {
        for size in 0..=candidates.len() {
            let best = candidates
                .iter()
                .combinations(size)
                .filter(|cubes| {
                    func.on_set()
                        .iter()
                        .all(|&index| cubes.iter().any(|cube| cube.evaluate(index)))
                })
                .map(|cubes| cubes.iter().map(|cube| cube.literal_count()).sum::<usize>())
                .min();
            if let Some(literals) = best {
                return (size, literals);
            }
        }
        unreachable!("the candidates always include a cover")
    }

    fn implicants(func: &BoolFunc) -> Vec<Cube> {
        (0..func.arity())
            .map(|_| Literal::ALL.iter().copied())
            .multi_cartesian_product()
            .map(|literals| Cube::new(literals).unwrap())
            .filter(|cube| func.off_set().iter().all(|&index| !cube.evaluate(index)))
            .collect()
    }

    proptest! {
        #[test]
        fn proptest_minimal_over_all_implicants(func in (1..=3_usize).prop_flat_map(bool_func_strategy)) {
            let cover = func.minimize().unwrap();
            prop_assert!(cover.agrees_with(&func).unwrap(), "cover {:?} agrees with {:?}", cover, func);
            let expected = brute_force_minimum(&func, &implicants(&func));
            prop_assert_eq!((cover.cube_count(), cover.literal_count()), expected);
        }

        #[test]
        fn proptest_minimal_over_primes(func in bool_func_strategy(4)) {
            let primes = func.prime_implicants().unwrap();
            let expected = brute_force_minimum(&func, primes.elements());

            let cover = func.minimize().unwrap();
            prop_assert!(cover.agrees_with(&func).unwrap());
            prop_assert_eq!((cover.cube_count(), cover.literal_count()), expected);

            let by_cubes = func.minimize_with(CostMetric::CubeCount).unwrap();
            prop_assert!(by_cubes.agrees_with(&func).unwrap());
            prop_assert_eq!(by_cubes.cube_count(), expected.0);

            let by_literals = func.minimize_with(CostMetric::LiteralCount).unwrap();
            prop_assert!(by_literals.agrees_with(&func).unwrap());
            prop_assert!(by_literals.literal_count() <= expected.1);

            for cover in func.minimize_all_with(CostMetric::default()).unwrap() {
                prop_assert!(cover.agrees_with(&func).unwrap());
                prop_assert_eq!((cover.cube_count(), cover.literal_count()), expected);
            }
        }
    }
}
