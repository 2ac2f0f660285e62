// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    boolfunc::BoolFunc,
    cover::Cover,
    cube::Cube,
    errors::{Error, Result},
};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeSet, HashSet};

impl BoolFunc {
    /// Returns every prime implicant of this function, sorted.
    pub fn prime_implicants(&self) -> Result<Cover> {
        quine_mccluskey(self.arity(), self.minterms().on_or_dc())
    }
}

/// Computes all prime implicants of the function with the given on-set and
/// don't-care-set, using the Quine–McCluskey tabular method.
///
/// Each round groups the current cubes by their number of `One` literals and tries to
/// merge every pair from adjacent groups. Cubes that merge with nothing are prime.
/// The merged cubes form the next round, until a round produces no merges.
///
/// The number of rounds is at most `arity + 1`, but the number of cubes per round can
/// grow exponentially with `arity`.
pub fn prime_implicants(arity: usize, on: &[u32], dc: &[u32]) -> Result<Cover> {
    quine_mccluskey(arity, on.iter().chain(dc).copied())
}

fn quine_mccluskey(arity: usize, minterms: impl Iterator<Item = u32>) -> Result<Cover> {
    let size = BoolFunc::assignment_count(arity)?;

    let mut current = BTreeSet::new();
    for index in minterms {
        if index >= size {
            return Err(Error::inconsistent(format!(
                "minterm {} is out of range for {} inputs",
                index, arity
            )));
        }
        current.insert(Cube::minterm_impl(arity, index));
    }

    let mut primes = BTreeSet::new();
    let mut round = 0;
    while !current.is_empty() {
        current = merge_round(round, &current, &mut primes);
        round += 1;
    }

    let mut cover = Cover::with_arity(arity);
    for prime in primes {
        cover.insert_unchecked(prime);
    }
    Ok(cover)
}

// Runs one round of merging. Cubes that merge with nothing are added to `primes`;
// the merged cubes are returned.
fn merge_round(
    round: usize,
    current: &BTreeSet<Cube>,
    primes: &mut BTreeSet<Cube>,
) -> BTreeSet<Cube> {
    let groups = current
        .iter()
        .map(|cube| (cube.ones_count(), cube))
        .into_group_map();

    let mut used = HashSet::new();
    let mut next = BTreeSet::new();
    for (ones, group) in &groups {
        let adjacent = match groups.get(&(ones + 1)) {
            Some(adjacent) => adjacent,
            None => continue,
        };
        for (&a, &b) in group.iter().cartesian_product(adjacent) {
            if let Some(merged) = a.merge(b) {
                trace!("round {}: {} + {} -> {}", round, a, b, merged);
                used.insert(a);
                used.insert(b);
                next.insert(merged);
            }
        }
    }

    let before = primes.len();
    primes.extend(current.iter().filter(|cube| !used.contains(cube)).cloned());
    debug!(
        "round {}: {} cubes in {} groups, {} merged, {} new primes",
        round,
        current.len(),
        groups.len(),
        next.len(),
        primes.len() - before,
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literal::Literal, proptest_helpers::bool_func_strategy};
    use proptest::prelude::*;
    use test_log::test;

    #[test]
    fn test_lsb_function() {
        let primes = prime_implicants(3, &[1, 3, 5, 7], &[]).unwrap();
        assert_eq!(primes, Cover::from_patterns(3, ["1--"]).unwrap());
    }

    #[test]
    fn test_cyclic_function() {
        let primes = prime_implicants(3, &[0, 1, 2, 5, 6, 7], &[]).unwrap();
        let expected =
            Cover::from_patterns(3, ["-00", "0-0", "10-", "01-", "1-1", "-11"]).unwrap();
        assert_eq!(primes, expected);

        // Output is sorted.
        let sorted: Vec<_> = primes.iter().cloned().sorted().collect();
        assert_eq!(primes.elements(), &sorted[..]);
    }

    #[test]
    fn test_dont_cares() {
        let primes = prime_implicants(2, &[1], &[3]).unwrap();
        assert_eq!(primes, Cover::from_patterns(2, ["1-"]).unwrap());

        let f = BoolFunc::from_pattern(2, "01-0").unwrap();
        let primes = f.prime_implicants().unwrap();
        assert_eq!(primes, Cover::from_patterns(2, ["10", "01"]).unwrap());
    }

    #[test]
    fn test_edge_cases() {
        assert!(prime_implicants(3, &[], &[]).unwrap().is_empty());
        assert_eq!(
            prime_implicants(2, &[0, 1, 2, 3], &[]).unwrap(),
            Cover::new(2, [Cube::universe(2).unwrap()]).unwrap()
        );
        assert_eq!(
            prime_implicants(0, &[0], &[]).unwrap(),
            Cover::new(0, [Cube::universe(0).unwrap()]).unwrap()
        );
        assert!(matches!(
            prime_implicants(2, &[4], &[]),
            Err(Error::InconsistentSpecification(_))
        ));
    }

    proptest! {
        #[test]
        fn proptest_primes_are_complete_and_prime(func in (0..=4_usize).prop_flat_map(bool_func_strategy)) {
            let primes = func.prime_implicants().unwrap();

            for &index in func.on_set() {
                prop_assert!(primes.evaluate(index), "on-set minterm {} is covered", index);
            }
            for prime in &primes {
                for &index in func.off_set() {
                    prop_assert!(!prime.evaluate(index), "prime {} avoids off-set minterm {}", prime, index);
                }
                // Raising any literal must hit the off-set.
                for var in 0..func.arity() {
                    if prime[var].is_defined() {
                        let raised = prime.with_literal(var, Literal::DontCare);
                        prop_assert!(
                            func.off_set().iter().any(|&index| raised.evaluate(index)),
                            "prime {} cannot be raised at {}", prime, var
                        );
                    }
                }
            }
        }
    }
}
