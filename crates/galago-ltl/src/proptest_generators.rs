//! Proptest strategies for random formulas.

use crate::formula::Ltl;
use proptest::prelude::*;

/// A random formula over the given proposition names, with nesting
/// bounded by `depth`. Keep both small: automaton construction is
/// exponential in the closure size.
pub fn arb_ltl(props: &'static [&'static str], depth: u32) -> impl Strategy<Value = Ltl<String>> {
    let leaf = prop_oneof![
        1 => Just(Ltl::True),
        4 => proptest::sample::select(props).prop_map(|p| Ltl::prop(p.to_string())),
    ];
    leaf.prop_recursive(depth, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Ltl::not),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Ltl::and(l, r)),
            inner.clone().prop_map(Ltl::next),
            (inner.clone(), inner).prop_map(|(l, r)| Ltl::until(l, r)),
        ]
    })
}
