//! Structural checks of the translated automaton for `a U b`, following
//! the hand-computed construction state by state.

use galago_ltl::{ltl_to_gnba, ltl_to_nba, Ltl};
use std::collections::BTreeSet;

type F = Ltl<&'static str>;

fn a() -> F {
    Ltl::prop("a")
}

fn b() -> F {
    Ltl::prop("b")
}

fn a_until_b() -> F {
    Ltl::until(a(), b())
}

fn elem(members: impl IntoIterator<Item = F>) -> BTreeSet<F> {
    members.into_iter().collect()
}

/// The five elementary sets over {a, b, a U b}.
fn expected_states() -> Vec<BTreeSet<F>> {
    vec![
        elem([a(), b(), a_until_b()]),
        elem([a(), Ltl::not(b()), a_until_b()]),
        elem([Ltl::not(a()), b(), a_until_b()]),
        elem([a(), Ltl::not(b()), Ltl::not(a_until_b())]),
        elem([Ltl::not(a()), Ltl::not(b()), Ltl::not(a_until_b())]),
    ]
}

#[test]
fn the_five_elementary_sets_are_exactly_the_states() {
    let gnba = ltl_to_gnba(&a_until_b());
    let states: Vec<_> = gnba.states().cloned().collect();
    assert_eq!(states.len(), 5);
    for expected in expected_states() {
        assert!(states.contains(&expected), "missing state {expected:?}");
    }
}

#[test]
fn only_until_holders_are_initial() {
    let gnba = ltl_to_gnba(&a_until_b());
    for state in gnba.states() {
        let initial = gnba.initial_states().contains(state);
        assert_eq!(initial, state.contains(&a_until_b()));
    }
}

#[test]
fn until_states_without_b_defer_to_their_successors() {
    // From {a, !b, U} the until is pending: every successor must carry
    // the until. From {a, !b, !U} no successor may carry it.
    let gnba = ltl_to_gnba(&a_until_b());
    let pending = elem([a(), Ltl::not(b()), a_until_b()]);
    let discharged = elem([a(), Ltl::not(b()), Ltl::not(a_until_b())]);
    for (source, _, destination) in gnba.edges() {
        if *source == pending {
            assert!(destination.contains(&a_until_b()));
        }
        if *source == discharged {
            assert!(!destination.contains(&a_until_b()));
        }
    }
}

#[test]
fn b_holding_states_step_anywhere() {
    // {!a, b, U} discharges the until immediately: all five states are
    // legal successors.
    let gnba = ltl_to_gnba(&a_until_b());
    let source = elem([Ltl::not(a()), b(), a_until_b()]);
    let successors: Vec<_> = gnba
        .edges()
        .filter(|(s, _, _)| **s == source)
        .map(|(_, _, d)| d.clone())
        .collect();
    assert_eq!(successors.len(), 5);
}

#[test]
fn degeneralized_until_keeps_the_state_structure() {
    let nba = ltl_to_nba(&a_until_b());
    // Single color: the counting component never leaves index 0.
    assert_eq!(nba.state_count(), 5);
    assert_eq!(nba.initial_states().len(), 3);
    assert_eq!(nba.accepting_states().len(), 4);
}
