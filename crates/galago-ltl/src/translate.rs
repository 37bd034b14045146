//! LTL-to-automaton translation: the closure-based generalized-Büchi
//! construction, followed by degeneralization to an ordinary Büchi
//! automaton.

use crate::automaton::{BuchiAutomaton, MultiColorAutomaton, Symbol};
use crate::closure::{closure, elementary_sets};
use crate::formula::Ltl;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// A translator automaton state: one elementary set of the closure.
pub type ElementarySet<P> = BTreeSet<Ltl<P>>;

/// Builds the generalized Büchi automaton for `phi`.
///
/// States are the consistent elementary sets; a state is initial iff it
/// contains `phi`, and reads the symbol formed by its own atomic
/// propositions. One acceptance color is assigned per `Until`
/// sub-formula; a formula without `Until` yields zero colors (handled by
/// [`degeneralize`]).
pub fn ltl_to_gnba<P>(phi: &Ltl<P>) -> MultiColorAutomaton<ElementarySet<P>, P>
where
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let cl = closure(phi);
    let untils: Vec<(&Ltl<P>, &Ltl<P>, &Ltl<P>)> = cl
        .iter()
        .filter_map(|member| match member {
            Ltl::Until(l, r) => Some((member, l.as_ref(), r.as_ref())),
            _ => None,
        })
        .collect();
    let nexts: Vec<(&Ltl<P>, &Ltl<P>)> = cl
        .iter()
        .filter_map(|member| match member {
            Ltl::Next(inner) => Some((member, inner.as_ref())),
            _ => None,
        })
        .collect();

    let states = elementary_sets(&cl);
    debug!(
        closure = cl.len(),
        elementary = states.len(),
        untils = untils.len(),
        "enumerated elementary sets"
    );

    let mut gnba = MultiColorAutomaton::new();
    for b in &states {
        gnba.add_state(b.clone());
        if b.contains(phi) {
            gnba.set_initial(b.clone());
        }
    }

    for (color, (whole, _, r)) in untils.iter().enumerate() {
        for b in &states {
            if !b.contains(*whole) || b.contains(*r) {
                gnba.set_accepting(b.clone(), color);
            }
        }
    }

    for b in &states {
        let sym: Symbol<P> = b
            .iter()
            .filter_map(|member| match member {
                Ltl::Prop(p) => Some(p.clone()),
                _ => None,
            })
            .collect();
        for b_next in &states {
            let nexts_ok = nexts
                .iter()
                .all(|(whole, inner)| b.contains(*whole) == b_next.contains(*inner));
            let untils_ok = untils.iter().all(|(whole, l, r)| {
                b.contains(*whole) == (b.contains(*r) || (b.contains(*l) && b_next.contains(*whole)))
            });
            if nexts_ok && untils_ok {
                gnba.add_transition(b.clone(), sym.clone(), b_next.clone());
            }
        }
    }

    gnba
}

/// Degeneralizes a multi-color automaton by the counting construction.
///
/// New states are `(q, color)` pairs tracking the color currently
/// awaited; leaving an accepting state of the awaited color advances to
/// the next color (cyclically), and `(q, c)` is accepting iff `q` is
/// accepting for `c`. A zero-color automaton is copied through at index
/// 0 with every state accepting.
pub fn degeneralize<Q, L>(gnba: &MultiColorAutomaton<Q, L>) -> BuchiAutomaton<(Q, usize), L>
where
    Q: Clone + Eq + Hash,
    L: Clone + Eq + Hash + Ord,
{
    let colors: Vec<usize> = gnba.colors().collect();
    let mut nba = BuchiAutomaton::new();

    if colors.is_empty() {
        for q in gnba.states() {
            nba.set_accepting((q.clone(), 0));
        }
        for q0 in gnba.initial_states() {
            nba.set_initial((q0.clone(), 0));
        }
        for (source, sym, destination) in gnba.edges() {
            nba.add_transition((source.clone(), 0), sym.clone(), (destination.clone(), 0));
        }
        return nba;
    }

    let k = colors.len();
    for q0 in gnba.initial_states() {
        nba.set_initial((q0.clone(), colors[0]));
    }
    for (idx, &color) in colors.iter().enumerate() {
        let accepting_here = gnba.accepting_states(color);
        for q in &accepting_here {
            nba.set_accepting((q.clone(), color));
        }
        for (source, sym, destination) in gnba.edges() {
            let next_color = if accepting_here.contains(source) {
                colors[(idx + 1) % k]
            } else {
                color
            };
            nba.add_transition(
                (source.clone(), color),
                sym.clone(),
                (destination.clone(), next_color),
            );
        }
    }
    nba
}

/// The full translation pipeline: formula to ordinary Büchi automaton.
pub fn ltl_to_nba<P>(phi: &Ltl<P>) -> BuchiAutomaton<(ElementarySet<P>, usize), P>
where
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let gnba = ltl_to_gnba(phi);
    let nba = degeneralize(&gnba);
    debug!(
        gnba_states = gnba.state_count(),
        colors = gnba.color_count(),
        nba_states = nba.state_count(),
        "translated formula"
    );
    nba
}
