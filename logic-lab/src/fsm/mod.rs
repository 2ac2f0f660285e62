// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finite-state machines with a total transition table, and their minimization.

mod encoding;
mod equivalence;

pub use encoding::*;
pub use equivalence::*;

use crate::errors::{Error, Result, SymbolKind};
use std::collections::HashMap;

/// A Mealy machine: every (state, input) pair has exactly one next state and output.
///
/// States, inputs and outputs are named; all operations also accept indices, which
/// follow the order the names were given in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fsm {
    inputs: Names,
    outputs: Names,
    states: Names,
    // (next state, output), indexed by `state * input_count + input`.
    transitions: Vec<(usize, usize)>,
}

impl Fsm {
    #[inline]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    #[inline]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn inputs(&self) -> &[String] {
        &self.inputs.names
    }

    #[inline]
    pub fn outputs(&self) -> &[String] {
        &self.outputs.names
    }

    #[inline]
    pub fn states(&self) -> &[String] {
        &self.states.names
    }

    pub fn input_ix(&self, name: &str) -> Option<usize> {
        self.inputs.ix(name)
    }

    pub fn output_ix(&self, name: &str) -> Option<usize> {
        self.outputs.ix(name)
    }

    pub fn state_ix(&self, name: &str) -> Option<usize> {
        self.states.ix(name)
    }

    pub fn next_state(&self, state: usize, input: usize) -> Option<usize> {
        self.entry(state, input).map(|(next, _)| next)
    }

    pub fn output(&self, state: usize, input: usize) -> Option<usize> {
        self.entry(state, input).map(|(_, output)| output)
    }

    /// Looks up a transition by name, returning the next state and output names.
    pub fn transition(&self, state: &str, input: &str) -> Result<(&str, &str)> {
        let state_ix = self.states.lookup(SymbolKind::State, state)?;
        let input_ix = self.inputs.lookup(SymbolKind::Input, input)?;
        let (next, output) = self.transition_ix(state_ix, input_ix);
        Ok((&self.states.names[next], &self.outputs.names[output]))
    }

    /// Drives the machine from `start` and returns the output index for every input.
    pub fn run(&self, start: usize, inputs: &[usize]) -> Result<Vec<usize>> {
        check_index(start, self.state_count())?;
        let mut state = start;
        inputs
            .iter()
            .map(|&input| {
                check_index(input, self.input_count())?;
                let (next, output) = self.transition_ix(state, input);
                state = next;
                Ok(output)
            })
            .collect()
    }

    /// Like [`run`](Self::run), with states, inputs and outputs given by name.
    pub fn trace(&self, start: &str, inputs: &[&str]) -> Result<Vec<&str>> {
        let start = self.states.lookup(SymbolKind::State, start)?;
        let inputs = inputs
            .iter()
            .map(|input| self.inputs.lookup(SymbolKind::Input, input))
            .collect::<Result<Vec<_>>>()?;
        let outputs = self.run(start, &inputs)?;
        Ok(outputs
            .into_iter()
            .map(|output| self.outputs.names[output].as_str())
            .collect())
    }

    /// Returns the pairs of next states whose equivalence `s` and `t` depend on, or
    /// `None` if the two states already differ in some output.
    ///
    /// Pairs are ordered `(low, high)`, sorted and free of duplicates. This is the cell
    /// for `(s, t)` in the classic table-filling chart.
    pub fn implied_pairs(&self, s: usize, t: usize) -> Option<Vec<(usize, usize)>> {
        if s >= self.state_count() || t >= self.state_count() {
            return None;
        }
        let mut pairs = vec![];
        for input in 0..self.input_count() {
            let (s_next, s_output) = self.transition_ix(s, input);
            let (t_next, t_output) = self.transition_ix(t, input);
            if s_output != t_output {
                return None;
            }
            if s_next != t_next {
                pairs.push((s_next.min(t_next), s_next.max(t_next)));
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        Some(pairs)
    }

    /// Merges equivalent states.
    ///
    /// Each class of equivalent states is replaced by its lowest-numbered state, and
    /// the new machine lists the representatives in their original order. `self` is
    /// left unchanged.
    pub fn minimize(&self) -> MinimizedFsm {
        let table = self.equivalence_table();
        let state_map = table.classes().to_vec();

        let representatives: Vec<usize> = (0..table.class_count())
            .filter_map(|class| table.representative(class))
            .collect();
        let mut transitions = Vec::with_capacity(representatives.len() * self.input_count());
        for &rep in &representatives {
            for input in 0..self.input_count() {
                let (next, output) = self.transition_ix(rep, input);
                transitions.push((state_map[next], output));
            }
        }

        let fsm = Fsm {
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            states: Names::new_unchecked(
                representatives
                    .iter()
                    .map(|&rep| self.states.names[rep].clone())
                    .collect(),
            ),
            transitions,
        };
        MinimizedFsm {
            fsm,
            table,
            state_map,
        }
    }

    fn entry(&self, state: usize, input: usize) -> Option<(usize, usize)> {
        if state < self.state_count() && input < self.input_count() {
            Some(self.transition_ix(state, input))
        } else {
            None
        }
    }

    #[inline]
    fn transition_ix(&self, state: usize, input: usize) -> (usize, usize) {
        self.transitions[state * self.input_count() + input]
    }
}

/// The result of [`Fsm::minimize`].
#[derive(Clone, Debug)]
pub struct MinimizedFsm {
    /// The machine with one state per equivalence class.
    pub fsm: Fsm,

    /// The refinement history that produced the classes.
    pub table: EquivalenceTable,

    /// `state_map[s]` is the state of `fsm` that original state `s` maps to.
    pub state_map: Vec<usize>,
}

/// Builds an [`Fsm`] one transition at a time.
#[derive(Clone, Debug)]
pub struct FsmBuilder {
    inputs: Names,
    outputs: Names,
    states: Names,
    transitions: Vec<Option<(usize, usize)>>,
}

impl FsmBuilder {
    /// Starts a machine with the given names. Every list must be non-empty and free of
    /// duplicates.
    pub fn new<I, O, S>(inputs: I, outputs: O, states: S) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let inputs = Names::new(SymbolKind::Input, inputs)?;
        let outputs = Names::new(SymbolKind::Output, outputs)?;
        let states = Names::new(SymbolKind::State, states)?;
        let transitions = vec![None; states.len() * inputs.len()];
        Ok(Self {
            inputs,
            outputs,
            states,
            transitions,
        })
    }

    pub fn add_transition(
        &mut self,
        from: &str,
        input: &str,
        next: &str,
        output: &str,
    ) -> Result<&mut Self> {
        let from_ix = self.states.lookup(SymbolKind::State, from)?;
        let input_ix = self.inputs.lookup(SymbolKind::Input, input)?;
        let next_ix = self.states.lookup(SymbolKind::State, next)?;
        let output_ix = self.outputs.lookup(SymbolKind::Output, output)?;

        let slot = &mut self.transitions[from_ix * self.inputs.len() + input_ix];
        if slot.is_some() {
            return Err(Error::DuplicateTransition {
                state: from.to_owned(),
                input: input.to_owned(),
            });
        }
        *slot = Some((next_ix, output_ix));
        Ok(self)
    }

    /// Freezes the machine. Fails if some (state, input) pair has no transition.
    pub fn build(self) -> Result<Fsm> {
        let input_count = self.inputs.len();
        let transitions = self
            .transitions
            .iter()
            .enumerate()
            .map(|(ix, entry)| {
                entry.ok_or_else(|| Error::UndefinedTransition {
                    state: self.states.names[ix / input_count].clone(),
                    input: self.inputs.names[ix % input_count].clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Fsm {
            inputs: self.inputs,
            outputs: self.outputs,
            states: self.states,
            transitions,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Names {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Names {
    fn new<I>(kind: SymbolKind, names: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(Error::inconsistent(format!("a machine needs at least one {}", kind)));
        }
        let mut index = HashMap::with_capacity(names.len());
        for (ix, name) in names.iter().enumerate() {
            if index.insert(name.clone(), ix).is_some() {
                return Err(Error::inconsistent(format!("duplicate {} `{}`", kind, name)));
            }
        }
        Ok(Self { names, index })
    }

    // The names must be distinct.
    fn new_unchecked(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(ix, name)| (name.clone(), ix))
            .collect();
        Self { names, index }
    }

    #[inline]
    fn len(&self) -> usize {
        self.names.len()
    }

    fn ix(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn lookup(&self, kind: SymbolKind, name: &str) -> Result<usize> {
        self.ix(name).ok_or_else(|| Error::UnknownSymbol {
            kind,
            name: name.to_owned(),
        })
    }
}

fn check_index(ix: usize, len: usize) -> Result<()> {
    if ix < len {
        Ok(())
    } else {
        Err(Error::ElementOutOfRange {
            element: ix,
            nelem: len,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::proptest_helpers::fsm_strategy;
    use proptest::{collection::vec, prelude::*};
    use test_log::test;

    /// Five states where B = C and D = E.
    pub(crate) fn five_state_machine() -> Fsm {
        let mut builder = FsmBuilder::new(["0", "1"], ["0", "1"], ["A", "B", "C", "D", "E"])
            .unwrap();
        builder
            .add_transition("A", "0", "B", "0")
            .unwrap()
            .add_transition("A", "1", "C", "0")
            .unwrap()
            .add_transition("B", "0", "D", "0")
            .unwrap()
            .add_transition("B", "1", "E", "0")
            .unwrap()
            .add_transition("C", "0", "D", "0")
            .unwrap()
            .add_transition("C", "1", "E", "0")
            .unwrap()
            .add_transition("D", "0", "D", "1")
            .unwrap()
            .add_transition("D", "1", "A", "0")
            .unwrap()
            .add_transition("E", "0", "E", "1")
            .unwrap()
            .add_transition("E", "1", "A", "0")
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_builder_errors() {
        assert!(matches!(
            FsmBuilder::new(["0", "0"], ["0"], ["A"]),
            Err(Error::InconsistentSpecification(_))
        ));
        assert!(FsmBuilder::new(["0"], ["0"], Vec::<String>::new()).is_err());

        let mut builder = FsmBuilder::new(["0", "1"], ["x"], ["A", "B"]).unwrap();
        assert_eq!(
            builder.add_transition("C", "0", "A", "x").err(),
            Some(Error::UnknownSymbol {
                kind: SymbolKind::State,
                name: "C".to_owned()
            })
        );
        assert!(builder.add_transition("A", "2", "A", "x").is_err());
        assert!(builder.add_transition("A", "0", "A", "y").is_err());
        builder.add_transition("A", "0", "B", "x").unwrap();
        assert_eq!(
            builder.add_transition("A", "0", "A", "x").err(),
            Some(Error::DuplicateTransition {
                state: "A".to_owned(),
                input: "0".to_owned()
            })
        );
        builder.add_transition("A", "1", "A", "x").unwrap();
        builder.add_transition("B", "1", "A", "x").unwrap();
        assert_eq!(
            builder.build(),
            Err(Error::UndefinedTransition {
                state: "B".to_owned(),
                input: "0".to_owned()
            })
        );
    }

    #[test]
    fn test_lookup_and_trace() {
        let fsm = five_state_machine();
        assert_eq!(fsm.state_count(), 5);
        assert_eq!(fsm.transition("D", "0"), Ok(("D", "1")));
        assert_eq!(fsm.state_ix("C"), Some(2));
        assert_eq!(fsm.next_state(2, 1), Some(4));
        assert_eq!(fsm.output(3, 0), Some(1));
        assert_eq!(fsm.next_state(5, 0), None);
        assert!(fsm.transition("F", "0").is_err());

        assert_eq!(
            fsm.trace("A", &["0", "0", "0", "1"]),
            Ok(vec!["0", "0", "1", "0"])
        );
        assert!(fsm.trace("A", &["2"]).is_err());
        assert!(fsm.run(0, &[0, 2]).is_err());
        assert!(fsm.run(9, &[]).is_err());
    }

    #[test]
    fn test_implied_pairs() {
        let fsm = five_state_machine();
        assert_eq!(fsm.implied_pairs(1, 2), Some(vec![]));
        assert_eq!(fsm.implied_pairs(3, 4), Some(vec![(3, 4)]));
        assert_eq!(fsm.implied_pairs(0, 1), Some(vec![(1, 3), (2, 4)]));
        assert_eq!(fsm.implied_pairs(0, 3), None);
    }

    #[test]
    fn test_minimize() {
        let fsm = five_state_machine();
        let original = fsm.clone();
        let minimized = fsm.minimize();
        assert_eq!(fsm, original);

        assert_eq!(minimized.state_map, vec![0, 1, 1, 2, 2]);
        let min = &minimized.fsm;
        assert_eq!(min.states(), ["A", "B", "D"]);
        assert_eq!(min.transition("A", "0"), Ok(("B", "0")));
        assert_eq!(min.transition("A", "1"), Ok(("B", "0")));
        assert_eq!(min.transition("B", "1"), Ok(("D", "0")));
        assert_eq!(min.transition("D", "0"), Ok(("D", "1")));
        assert_eq!(min.transition("D", "1"), Ok(("A", "0")));

        // Minimizing again changes nothing.
        let again = min.minimize();
        assert_eq!(&again.fsm, min);
        assert_eq!(again.state_map, vec![0, 1, 2]);
    }

    #[test]
    fn test_minimize_to_single_state() {
        let mut builder = FsmBuilder::new(["a", "b"], ["o"], ["S", "T", "U"]).unwrap();
        for state in ["S", "T", "U"] {
            builder.add_transition(state, "a", "T", "o").unwrap();
            builder.add_transition(state, "b", "U", "o").unwrap();
        }
        let minimized = builder.build().unwrap().minimize();
        assert_eq!(minimized.fsm.state_count(), 1);
        assert_eq!(minimized.state_map, vec![0, 0, 0]);
        assert_eq!(minimized.fsm.transition("S", "b"), Ok(("S", "o")));
    }

    proptest! {
        #[test]
        fn proptest_minimized_traces_match(
            fsm in fsm_strategy(6, 3, 3),
            sequence in vec(any::<prop::sample::Index>(), 0..12),
        ) {
            let minimized = fsm.minimize();
            prop_assert!(minimized.fsm.state_count() <= fsm.state_count());
            let inputs: Vec<usize> = sequence.iter().map(|ix| ix.index(fsm.input_count())).collect();
            for start in 0..fsm.state_count() {
                prop_assert_eq!(
                    fsm.run(start, &inputs).unwrap(),
                    minimized.fsm.run(minimized.state_map[start], &inputs).unwrap()
                );
            }
            // States of the minimized machine are pairwise distinguishable.
            let again = minimized.fsm.minimize();
            prop_assert_eq!(again.fsm.state_count(), minimized.fsm.state_count());
        }
    }
}
