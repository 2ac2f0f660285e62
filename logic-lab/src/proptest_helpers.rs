// Copyright (c) The logic-lab Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategies for generating random cubes, covers, functions and machines.

use crate::{
    boolfunc::BoolFunc,
    cover::Cover,
    cube::Cube,
    fsm::{Fsm, FsmBuilder},
    literal::Literal,
};
use proptest::{collection::vec, prelude::*};

impl Arbitrary for Literal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(Literal::ALL.to_vec()).boxed()
    }
}

/// Cubes with exactly `arity` literals.
pub fn cube_strategy(arity: usize) -> BoxedStrategy<Cube> {
    vec(any::<Literal>(), arity)
        .prop_map(|literals| Cube::new(literals).expect("arity is in range"))
        .boxed()
}

/// Covers with up to `max_cubes` cubes, before duplicates are dropped.
pub fn cover_strategy(arity: usize, max_cubes: usize) -> BoxedStrategy<Cover> {
    vec(cube_strategy(arity), 0..=max_cubes)
        .prop_map(move |cubes| Cover::new(arity, cubes).expect("cubes have the right arity"))
        .boxed()
}

/// Functions with every value picked independently. Don't-cares are rarer than 0 or 1.
pub fn bool_func_strategy(arity: usize) -> BoxedStrategy<BoolFunc> {
    let value = prop_oneof![
        2 => Just(Literal::Zero),
        2 => Just(Literal::One),
        1 => Just(Literal::DontCare),
    ];
    vec(value, 1 << arity)
        .prop_map(move |values| {
            BoolFunc::from_values(arity, values).expect("table has 2^arity entries")
        })
        .boxed()
}

/// Machines with states `s0..`, inputs `i0..` and outputs `o0..`, with at least one of
/// each.
pub fn fsm_strategy(
    max_states: usize,
    max_inputs: usize,
    max_outputs: usize,
) -> BoxedStrategy<Fsm> {
    (1..=max_states, 1..=max_inputs, 1..=max_outputs)
        .prop_flat_map(|(states, inputs, outputs)| {
            let entries = vec((0..states, 0..outputs), states * inputs);
            (Just(states), Just(inputs), Just(outputs), entries)
        })
        .prop_map(|(states, inputs, outputs, entries)| {
            let state_names: Vec<String> = (0..states).map(|ix| format!("s{}", ix)).collect();
            let input_names: Vec<String> = (0..inputs).map(|ix| format!("i{}", ix)).collect();
            let output_names: Vec<String> = (0..outputs).map(|ix| format!("o{}", ix)).collect();
            let mut builder =
                FsmBuilder::new(input_names.clone(), output_names.clone(), state_names.clone())
                    .expect("names are non-empty and distinct");
            for (ix, (next, output)) in entries.into_iter().enumerate() {
                builder
                    .add_transition(
                        &state_names[ix / inputs],
                        &input_names[ix % inputs],
                        &state_names[next],
                        &output_names[output],
                    )
                    .expect("each transition is added once");
            }
            builder.build().expect("every transition is defined")
        })
        .boxed()
}
