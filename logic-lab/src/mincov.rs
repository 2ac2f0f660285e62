// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exact minimum-cost set cover.

use crate::errors::{Error, Result};
use bitvec::prelude::*;
use log::{debug, trace};

/// A set-cover instance: `nelem` elements and a list of clauses, each a subset of the
/// elements with a positive cost.
///
/// A cover is a set of clauses whose union is every element. The solvers are exact, so
/// their worst case is exponential in the number of clauses; keeping instances small
/// is the caller's job.
#[derive(Clone, Debug, Default)]
pub struct MinCov {
    nelem: usize,
    clauses: Vec<BitVec>,
    costs: Vec<u32>,
}

impl MinCov {
    pub fn new(nelem: usize) -> Self {
        Self {
            nelem,
            clauses: vec![],
            costs: vec![],
        }
    }

    #[inline]
    pub fn nelem(&self) -> usize {
        self.nelem
    }

    #[inline]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Adds a clause of cost 1 and returns its id.
    pub fn add_clause(&mut self, elements: &[usize]) -> Result<usize> {
        self.add_clause_with_cost(elements, 1)
    }

    pub fn add_clause_with_cost(&mut self, elements: &[usize], cost: u32) -> Result<usize> {
        if cost == 0 {
            return Err(Error::inconsistent("clause cost must be positive"));
        }
        let mut clause = bitvec![0; self.nelem];
        for &element in elements {
            if element >= self.nelem {
                return Err(Error::ElementOutOfRange {
                    element,
                    nelem: self.nelem,
                });
            }
            clause.set(element, true);
        }
        self.clauses.push(clause);
        self.costs.push(cost);
        Ok(self.clauses.len() - 1)
    }

    /// Returns the elements of clause `id`, in increasing order.
    pub fn clause(&self, id: usize) -> Option<impl Iterator<Item = usize> + '_> {
        self.clauses.get(id).map(|clause| clause.iter_ones())
    }

    #[inline]
    pub fn clause_cost(&self, id: usize) -> Option<u32> {
        self.costs.get(id).copied()
    }

    /// Returns the total cost of a selection of clauses.
    pub fn cost_of(&self, selection: &[usize]) -> Result<u64> {
        selection.iter().try_fold(0, |acc, &id| {
            let cost = self.clause_cost(id).ok_or(Error::ElementOutOfRange {
                element: id,
                nelem: self.clause_count(),
            })?;
            Ok(acc + u64::from(cost))
        })
    }

    /// Returns true if the selected clauses cover every element.
    pub fn is_cover(&self, selection: &[usize]) -> bool {
        let mut covered = bitvec![0; self.nelem];
        for clause in selection.iter().filter_map(|&id| self.clauses.get(id)) {
            for element in clause.iter_ones() {
                covered.set(element, true);
            }
        }
        covered.all()
    }

    /// Returns one minimum-cost cover as a sorted list of clause ids.
    ///
    /// Fails with [`Error::UnsatisfiableCover`] if some element is in no clause.
    pub fn solve(&self) -> Result<Vec<usize>> {
        let solutions = Search::new(self, SearchMode::First).run()?;
        Ok(solutions.into_iter().next().unwrap_or_default())
    }

    /// Returns every minimum-cost cover, each a sorted list of clause ids, in
    /// lexicographic order.
    ///
    /// Unlike [`solve`](Self::solve), this never discards dominated clauses, since a
    /// dominated clause can still be part of a cover that ties for the minimum.
    pub fn all_cover(&self) -> Result<Vec<Vec<usize>>> {
        let mut solutions = Search::new(self, SearchMode::All).run()?;
        solutions.sort();
        Ok(solutions)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SearchMode {
    /// Stop at one optimum. Dominated clauses are pruned.
    First,
    /// Keep every optimum.
    All,
}

#[derive(Clone, Debug)]
struct Node {
    selected: Vec<usize>,
    cost: u64,
    uncovered: BitVec,
    // Clauses that may still be selected in this subtree.
    available: BitVec,
}

impl Node {
    fn select(&mut self, mincov: &MinCov, id: usize) {
        self.selected.push(id);
        self.cost += u64::from(mincov.costs[id]);
        self.available.set(id, false);
        for element in mincov.clauses[id].iter_ones() {
            self.uncovered.set(element, false);
        }
    }
}

struct Search<'a> {
    mincov: &'a MinCov,
    mode: SearchMode,
    best_cost: Option<u64>,
    solutions: Vec<Vec<usize>>,
}

impl<'a> Search<'a> {
    fn new(mincov: &'a MinCov, mode: SearchMode) -> Self {
        Self {
            mincov,
            mode,
            best_cost: None,
            solutions: vec![],
        }
    }

    fn run(mut self) -> Result<Vec<Vec<usize>>> {
        let mincov = self.mincov;
        for element in 0..mincov.nelem {
            if !mincov.clauses.iter().any(|clause| clause[element]) {
                return Err(Error::UnsatisfiableCover { element });
            }
        }
        debug!(
            "{:?} search: {} elements, {} clauses",
            self.mode,
            mincov.nelem,
            mincov.clause_count()
        );

        let mut stack = vec![Node {
            selected: vec![],
            cost: 0,
            uncovered: bitvec![1; mincov.nelem],
            available: bitvec![1; mincov.clause_count()],
        }];
        let mut explored = 0_usize;

        while let Some(mut node) = stack.pop() {
            explored += 1;
            if !self.reduce(&mut node) {
                trace!("node {:?}: infeasible", node.selected);
                continue;
            }
            if self.is_bounded(&node) {
                trace!("node {:?}: bounded at cost {}", node.selected, node.cost);
                continue;
            }
            if node.uncovered.not_any() {
                self.record(node);
                continue;
            }

            let element = match self.branch_element(&node) {
                Some(element) => element,
                None => continue,
            };
            let candidates = self.candidates(&node, element);
            trace!(
                "node {:?}: branching on element {} over {:?}",
                node.selected,
                element,
                candidates
            );
            // Branch `ix` takes candidate `ix` and rules out the earlier ones, so no
            // cover is reached twice. Pushed in reverse so the first candidate is
            // explored first.
            for (ix, &id) in candidates.iter().enumerate().rev() {
                let mut child = node.clone();
                for &earlier in &candidates[..ix] {
                    child.available.set(earlier, false);
                }
                child.select(mincov, id);
                stack.push(child);
            }
        }

        debug!(
            "{:?} search: explored {} nodes, best cost {:?}, {} solutions",
            self.mode,
            explored,
            self.best_cost,
            self.solutions.len()
        );
        Ok(self.solutions)
    }

    // Applies essential-clause selection (and, when looking for a single optimum,
    // dominance pruning) until nothing changes. Returns false if some uncovered
    // element can no longer be covered.
    fn reduce(&self, node: &mut Node) -> bool {
        loop {
            let mut changed = false;

            let uncovered: Vec<usize> = node.uncovered.iter_ones().collect();
            for element in uncovered {
                if !node.uncovered[element] {
                    continue;
                }
                let choices: Vec<usize> = covering(self.mincov, node, element).take(2).collect();
                match choices[..] {
                    [] => return false,
                    [essential] => {
                        trace!("clause {} is essential for element {}", essential, element);
                        node.select(self.mincov, essential);
                        changed = true;
                    }
                    _ => {}
                }
            }

            if self.mode == SearchMode::First {
                changed |= self.remove_dominated(node);
            }
            if !changed {
                return true;
            }
        }
    }

    fn remove_dominated(&self, node: &mut Node) -> bool {
        let live: Vec<usize> = node.available.iter_ones().collect();
        let mut changed = false;
        for &id in &live {
            let useless = !self.mincov.clauses[id]
                .iter_ones()
                .any(|element| node.uncovered[element]);
            let dominated = useless
                || live.iter().any(|&other| {
                    other != id && node.available[other] && self.dominates(node, other, id)
                });
            if dominated {
                trace!("clause {} is dominated", id);
                node.available.set(id, false);
                changed = true;
            }
        }
        changed
    }

    // Whether clause `a` covers every uncovered element `b` does, at no greater cost.
    // Identical clauses are broken by id.
    fn dominates(&self, node: &Node, a: usize, b: usize) -> bool {
        let (clause_a, clause_b) = (&self.mincov.clauses[a], &self.mincov.clauses[b]);
        let (cost_a, cost_b) = (self.mincov.costs[a], self.mincov.costs[b]);
        let subset = |small: &BitVec, large: &BitVec| {
            small
                .iter_ones()
                .all(|element| !node.uncovered[element] || large[element])
        };
        if cost_a > cost_b || !subset(clause_b, clause_a) {
            return false;
        }
        let equal = cost_a == cost_b && subset(clause_a, clause_b);
        !equal || a < b
    }

    fn is_bounded(&self, node: &Node) -> bool {
        let best = match self.best_cost {
            Some(best) => best,
            None => return false,
        };
        // Any completion adds at least one more clause.
        let remaining = if node.uncovered.any() {
            node.available
                .iter_ones()
                .map(|id| u64::from(self.mincov.costs[id]))
                .min()
                .unwrap_or(0)
        } else {
            0
        };
        let bound = node.cost + remaining;
        match self.mode {
            SearchMode::First => bound >= best,
            SearchMode::All => bound > best,
        }
    }

    fn record(&mut self, node: Node) {
        let mut selected = node.selected;
        selected.sort_unstable();
        match self.best_cost {
            Some(best) if node.cost == best => {
                trace!("tied cover {:?} at cost {}", selected, node.cost);
            }
            _ => {
                debug!("new best cover {:?} at cost {}", selected, node.cost);
                self.best_cost = Some(node.cost);
                self.solutions.clear();
            }
        }
        self.solutions.push(selected);
    }

    // The uncovered element with the fewest candidate clauses.
    fn branch_element(&self, node: &Node) -> Option<usize> {
        node.uncovered
            .iter_ones()
            .min_by_key(|&element| covering(self.mincov, node, element).count())
    }

    // Available clauses covering `element`, most useful first.
    fn candidates(&self, node: &Node, element: usize) -> Vec<usize> {
        let mut candidates: Vec<usize> = covering(self.mincov, node, element).collect();
        candidates.sort_by_key(|&id| {
            let gain = self.mincov.clauses[id]
                .iter_ones()
                .filter(|&covered| node.uncovered[covered])
                .count();
            (std::cmp::Reverse(gain), self.mincov.costs[id], id)
        });
        candidates
    }
}

fn covering<'b>(
    mincov: &'b MinCov,
    node: &'b Node,
    element: usize,
) -> impl Iterator<Item = usize> + 'b {
    node.available
        .iter_ones()
        .filter(move |&id| mincov.clauses[id][element])
}
