// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fsm::Fsm;
use log::debug;
use std::collections::HashMap;

/// The history of partition refinement over the states of an [`Fsm`].
///
/// Step 0 groups states with identical outputs for every input. Step `k + 1` splits a
/// class of step `k` whenever two of its states move to different classes on some
/// input. The last step is the equivalence partition.
///
/// At every step, class ids are numbered in order of the lowest state in each class,
/// so the representative of class `c` is its lowest state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquivalenceTable {
    steps: Vec<Vec<usize>>,
    class_counts: Vec<usize>,
}

impl Fsm {
    /// Refines the states of this machine into equivalence classes.
    pub fn equivalence_table(&self) -> EquivalenceTable {
        let initial = number_classes((0..self.state_count()).map(|state| {
            (0..self.input_count())
                .filter_map(|input| self.output(state, input))
                .collect::<Vec<_>>()
        }));
        let mut table = EquivalenceTable {
            steps: vec![],
            class_counts: vec![],
        };
        table.push(initial);

        loop {
            let previous = table.classes();
            let (refined, count) = number_classes((0..self.state_count()).map(|state| {
                let mut key = Vec::with_capacity(self.input_count() + 1);
                key.push(previous[state]);
                key.extend(
                    (0..self.input_count())
                        .filter_map(|input| self.next_state(state, input))
                        .map(|next| previous[next]),
                );
                key
            }));
            // Refinement only ever splits classes, so an unchanged count is a fixpoint.
            if count == table.class_count() {
                break;
            }
            table.push((refined, count));
        }
        table
    }
}

impl EquivalenceTable {
    fn push(&mut self, (classes, count): (Vec<usize>, usize)) {
        debug!("refinement step {}: {} classes", self.steps.len(), count);
        self.steps.push(classes);
        self.class_counts.push(count);
    }

    /// The number of refinement steps, including the initial output partition.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The class of every state at refinement step `step`.
    pub fn classes_at(&self, step: usize) -> Option<&[usize]> {
        self.steps.get(step).map(Vec::as_slice)
    }

    /// The class of every state in the final partition.
    pub fn classes(&self) -> &[usize] {
        self.steps.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn class_of(&self, state: usize) -> Option<usize> {
        self.classes().get(state).copied()
    }

    pub fn class_count(&self) -> usize {
        self.class_counts.last().copied().unwrap_or(0)
    }

    pub fn is_equivalent(&self, s: usize, t: usize) -> bool {
        match (self.class_of(s), self.class_of(t)) {
            (Some(s_class), Some(t_class)) => s_class == t_class,
            _ => false,
        }
    }

    /// Whether `s` and `t` are still in the same class after `step` refinements.
    pub fn is_equivalent_at(&self, s: usize, t: usize, step: usize) -> bool {
        let classes = match self.classes_at(step) {
            Some(classes) => classes,
            None => return false,
        };
        match (classes.get(s), classes.get(t)) {
            (Some(s_class), Some(t_class)) => s_class == t_class,
            _ => false,
        }
    }

    /// All pairs `(s, t)` with `s < t` of equivalent states.
    pub fn equivalent_pairs(&self) -> Vec<(usize, usize)> {
        let classes = self.classes();
        let mut pairs = vec![];
        for s in 0..classes.len() {
            for t in s + 1..classes.len() {
                if classes[s] == classes[t] {
                    pairs.push((s, t));
                }
            }
        }
        pairs
    }

    /// The equivalence classes in class-id order, each listing its states in
    /// increasing order. Singleton classes are included.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![vec![]; self.class_count()];
        for (state, &class) in self.classes().iter().enumerate() {
            groups[class].push(state);
        }
        groups
    }

    /// The lowest state of class `class`.
    pub fn representative(&self, class: usize) -> Option<usize> {
        self.classes().iter().position(|&c| c == class)
    }
}

// Gives equal keys equal ids, numbered by first appearance. Returns the ids and their
// count.
fn number_classes<K>(keys: impl Iterator<Item = K>) -> (Vec<usize>, usize)
where
    K: Eq + std::hash::Hash,
{
    let mut ids = HashMap::new();
    let classes = keys
        .map(|key| {
            let next_id = ids.len();
            *ids.entry(key).or_insert(next_id)
        })
        .collect();
    (classes, ids.len())
}
