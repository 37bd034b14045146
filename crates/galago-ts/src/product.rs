//! Product constructions: handshake interleaving of two systems, and the
//! system x automaton product consumed by the verification pipeline.

use crate::transition_system::TransitionSystem;
use galago_ltl::automaton::BuchiAutomaton;
use indexmap::IndexSet;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// Interleaving with an empty handshake set: both systems step
/// independently on every action.
pub fn interleave<S1, S2, A, P>(
    ts1: &TransitionSystem<S1, A, P>,
    ts2: &TransitionSystem<S2, A, P>,
) -> TransitionSystem<(S1, S2), A, P>
where
    S1: Clone + Eq + Hash + fmt::Debug,
    S2: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    interleave_with_handshake(ts1, ts2, &IndexSet::new())
}

/// The interleaved composition of two systems over `S1 x S2`.
///
/// The full cross product is materialized, reachable or not. A pair is
/// initial iff both components are, and its label is the union of the
/// component labels. Actions in `handshake` fire only as joint
/// co-transitions of both systems; every other action steps one component
/// and leaves the other in place.
pub fn interleave_with_handshake<S1, S2, A, P>(
    ts1: &TransitionSystem<S1, A, P>,
    ts2: &TransitionSystem<S2, A, P>,
    handshake: &IndexSet<A>,
) -> TransitionSystem<(S1, S2), A, P>
where
    S1: Clone + Eq + Hash + fmt::Debug,
    S2: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut builder = TransitionSystem::builder();
    builder.name(format!("{} ||| {}", ts1.name(), ts2.name()));

    for s1 in ts1.states() {
        for s2 in ts2.states() {
            let pair = (s1.clone(), s2.clone());
            builder.add_state(pair.clone());
            if ts1.initial_states().contains(s1) && ts2.initial_states().contains(s2) {
                builder.add_initial_state(pair.clone());
            }
            for p in ts1.label(s1) {
                builder.add_label(pair.clone(), p);
            }
            for p in ts2.label(s2) {
                builder.add_label(pair.clone(), p);
            }
        }
    }

    builder.add_actions(ts1.actions().iter().cloned());
    builder.add_actions(ts2.actions().iter().cloned());
    builder.add_atomic_propositions(ts1.propositions().iter().cloned());
    builder.add_atomic_propositions(ts2.propositions().iter().cloned());

    // Handshake actions require a co-transition in both components.
    for t1 in ts1.transitions() {
        if !handshake.contains(&t1.action) {
            continue;
        }
        for t2 in ts2.transitions() {
            if t2.action == t1.action {
                builder.add_transition(
                    (t1.from.clone(), t2.from.clone()),
                    t1.action.clone(),
                    (t1.to.clone(), t2.to.clone()),
                );
            }
        }
    }

    // Everything else interleaves, keeping the other component fixed.
    for t1 in ts1.transitions() {
        if handshake.contains(&t1.action) {
            continue;
        }
        for s2 in ts2.states() {
            builder.add_transition(
                (t1.from.clone(), s2.clone()),
                t1.action.clone(),
                (t1.to.clone(), s2.clone()),
            );
        }
    }
    for t2 in ts2.transitions() {
        if handshake.contains(&t2.action) {
            continue;
        }
        for s1 in ts1.states() {
            builder.add_transition(
                (s1.clone(), t2.from.clone()),
                t2.action.clone(),
                (s1.clone(), t2.to.clone()),
            );
        }
    }

    let ts = builder.build();
    debug!(
        states = ts.states().len(),
        transitions = ts.transitions().len(),
        "interleaved composition built"
    );
    ts
}

/// The product of a system with an automaton reading its labels.
///
/// States are `(s, q)` pairs; the automaton consumes the label of the
/// destination system state on every step. The product's atomic
/// propositions are the automaton states themselves, with
/// `L(s, q) = {q}`, so acceptance checks reduce to label membership.
pub fn product<S, A, P, Q>(
    ts: &TransitionSystem<S, A, P>,
    aut: &BuchiAutomaton<Q, P>,
) -> TransitionSystem<(S, Q), A, Q>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
    Q: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut builder = TransitionSystem::builder();
    builder.name(format!("{} x automaton", ts.name()));

    builder.add_actions(ts.actions().iter().cloned());
    builder.add_atomic_propositions(aut.states().cloned());

    for s in ts.states() {
        let label = ts.label(s);
        for q in aut.states() {
            let pair = (s.clone(), q.clone());
            builder.add_state(pair.clone());
            builder.add_label(pair.clone(), q.clone());
            if ts.initial_states().contains(s) {
                let entered = aut
                    .initial_states()
                    .iter()
                    .any(|q0| aut.next_states(q0, &label).contains(q));
                if entered {
                    builder.add_initial_state(pair);
                }
            }
        }
    }

    for t in ts.transitions() {
        let destination_label = ts.label(&t.to);
        for q in aut.states() {
            for q_next in aut.next_states(q, &destination_label) {
                builder.add_transition(
                    (t.from.clone(), q.clone()),
                    t.action.clone(),
                    (t.to.clone(), q_next.clone()),
                );
            }
        }
    }

    let prod = builder.build();
    debug!(
        states = prod.states().len(),
        transitions = prod.transitions().len(),
        initial = prod.initial_states().len(),
        "system x automaton product built"
    );
    prod
}

#[cfg(test)]
mod tests {
    use super::*;
    use galago_ltl::automaton::symbol;

    type Ts = TransitionSystem<&'static str, &'static str, &'static str>;

    fn left() -> Ts {
        let mut b = Ts::builder();
        b.name("left")
            .add_initial_state("l0")
            .add_transition("l0", "step", "l1")
            .add_transition("l0", "sync", "l1")
            .add_label("l0", "at_l0");
        b.build()
    }

    fn right() -> Ts {
        let mut b = Ts::builder();
        b.name("right")
            .add_initial_state("r0")
            .add_transition("r0", "sync", "r1")
            .add_label("r0", "at_r0")
            .add_label("r1", "done");
        b.build()
    }

    #[test]
    fn interleaving_materializes_the_full_cross_product() {
        let prod = interleave(&left(), &right());
        assert_eq!(prod.states().len(), 4);
        assert_eq!(prod.initial_states().len(), 1);
        assert!(prod.initial_states().contains(&("l0", "r0")));
    }

    #[test]
    fn labels_union_componentwise_even_when_unreachable() {
        let (l, r) = (left(), right());
        let prod = interleave(&l, &r);
        for s1 in l.states() {
            for s2 in r.states() {
                let mut expected = l.label(s1);
                expected.extend(r.label(s2));
                assert_eq!(prod.label(&(*s1, *s2)), expected);
            }
        }
    }

    #[test]
    fn handshake_only_fires_jointly() {
        let handshake = IndexSet::from(["sync"]);
        let prod = interleave_with_handshake(&left(), &right(), &handshake);
        for t in prod.transitions() {
            if t.action == "sync" {
                // Both components must move on a handshake transition.
                assert_ne!(t.from.0, t.to.0);
                assert_ne!(t.from.1, t.to.1);
            }
        }
        // "step" still interleaves: the right component stays put.
        assert!(prod
            .transitions()
            .iter()
            .any(|t| t.action == "step" && t.from.1 == t.to.1));
    }

    #[test]
    fn handshake_without_a_partner_produces_no_transition() {
        let mut b = Ts::builder();
        b.add_initial_state("x0").add_transition("x0", "sync", "x1");
        let lonely = b.build();
        let mut b = Ts::builder();
        b.add_initial_state("y0").add_action("sync");
        let silent = b.build();
        let prod = interleave_with_handshake(&lonely, &silent, &IndexSet::from(["sync"]));
        assert!(prod.transitions().is_empty());
    }

    #[test]
    fn product_consumes_destination_labels() {
        // Single run: s0 -> s1 -> s1 with s1 labeled "p".
        let mut b = TransitionSystem::<&str, &str, &str>::builder();
        b.add_initial_state("s0")
            .add_transition("s0", "a", "s1")
            .add_transition("s1", "a", "s1")
            .add_label("s1", "p");
        let ts = b.build();

        // Two-state automaton tracking whether "p" was just read.
        let mut aut = BuchiAutomaton::new();
        aut.add_transition("q0", symbol([]), "q0");
        aut.add_transition("q0", symbol(["p"]), "q1");
        aut.add_transition("q1", symbol(["p"]), "q1");
        aut.set_initial("q0");
        aut.set_accepting("q1");

        let prod = product(&ts, &aut);
        // s0 carries no label, so only q0 can be entered initially.
        assert_eq!(prod.initial_states().len(), 1);
        assert!(prod.initial_states().contains(&("s0", "q0")));
        // The automaton component is the product label.
        assert_eq!(prod.label(&("s1", "q1")).len(), 1);
        // Stepping to s1 reads {p} and moves the automaton to q1.
        assert!(prod
            .transitions()
            .iter()
            .any(|t| t.from == ("s0", "q0") && t.to == ("s1", "q1")));
        assert!(!prod
            .transitions()
            .iter()
            .any(|t| t.from == ("s0", "q0") && t.to == ("s1", "q0")));
    }
}
