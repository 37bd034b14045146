//! Nondeterministic Büchi automata, ordinary and generalized.

use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

/// An alphabet symbol: the set of atomic propositions read in one step.
pub type Symbol<L> = BTreeSet<L>;

/// Builds a [`Symbol`] from anything iterable; convenient in tests.
pub fn symbol<L: Ord>(items: impl IntoIterator<Item = L>) -> Symbol<L> {
    items.into_iter().collect()
}

/// A nondeterministic Büchi automaton with a single accepting set.
///
/// The transition function is total: a `(state, symbol)` pair without an
/// entry simply has no successors. States are registered on first
/// mention, so every endpoint of a transition is a known state.
#[derive(Debug, Clone)]
pub struct BuchiAutomaton<Q, L> {
    transitions: IndexMap<Q, IndexMap<Symbol<L>, IndexSet<Q>>>,
    initial: IndexSet<Q>,
    accepting: IndexSet<Q>,
}

impl<Q: Eq + Hash, L: Eq + Hash + Ord> PartialEq for BuchiAutomaton<Q, L> {
    fn eq(&self, other: &Self) -> bool {
        self.transitions == other.transitions
            && self.initial == other.initial
            && self.accepting == other.accepting
    }
}

impl<Q: Eq + Hash, L: Eq + Hash + Ord> Eq for BuchiAutomaton<Q, L> {}

impl<Q, L> Default for BuchiAutomaton<Q, L> {
    fn default() -> Self {
        Self {
            transitions: IndexMap::new(),
            initial: IndexSet::new(),
            accepting: IndexSet::new(),
        }
    }
}

impl<Q, L> BuchiAutomaton<Q, L>
where
    Q: Clone + Eq + Hash,
    L: Clone + Eq + Hash + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, q: Q) {
        self.transitions.entry(q).or_default();
    }

    pub fn add_transition(&mut self, source: Q, symbol: Symbol<L>, destination: Q) {
        self.add_state(destination.clone());
        self.transitions
            .entry(source)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(destination);
    }

    pub fn set_initial(&mut self, q: Q) {
        self.add_state(q.clone());
        self.initial.insert(q);
    }

    pub fn set_accepting(&mut self, q: Q) {
        self.add_state(q.clone());
        self.accepting.insert(q);
    }

    pub fn states(&self) -> impl Iterator<Item = &Q> {
        self.transitions.keys()
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn initial_states(&self) -> &IndexSet<Q> {
        &self.initial
    }

    pub fn accepting_states(&self) -> &IndexSet<Q> {
        &self.accepting
    }

    /// `delta(q, symbol)`; empty when no transition is defined.
    pub fn next_states(&self, q: &Q, symbol: &Symbol<L>) -> IndexSet<Q> {
        self.transitions
            .get(q)
            .and_then(|per_symbol| per_symbol.get(symbol))
            .cloned()
            .unwrap_or_default()
    }

    /// All `(source, symbol, destination)` triples, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Q, &Symbol<L>, &Q)> {
        self.transitions.iter().flat_map(|(source, per_symbol)| {
            per_symbol.iter().flat_map(move |(sym, destinations)| {
                destinations.iter().map(move |d| (source, sym, d))
            })
        })
    }
}

impl<Q: fmt::Debug, L: fmt::Debug> fmt::Display for BuchiAutomaton<Q, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, per_symbol) in &self.transitions {
            for (sym, destinations) in per_symbol {
                for d in destinations {
                    writeln!(f, "{source:?} --{sym:?}--> {d:?}")?;
                }
            }
        }
        Ok(())
    }
}

/// A generalized Büchi automaton: one accepting set per color, all of
/// which must be visited infinitely often.
#[derive(Debug, Clone)]
pub struct MultiColorAutomaton<Q, L> {
    transitions: IndexMap<Q, IndexMap<Symbol<L>, IndexSet<Q>>>,
    initial: IndexSet<Q>,
    accepting: IndexMap<usize, IndexSet<Q>>,
}

impl<Q: Eq + Hash, L: Eq + Hash + Ord> PartialEq for MultiColorAutomaton<Q, L> {
    fn eq(&self, other: &Self) -> bool {
        self.transitions == other.transitions
            && self.initial == other.initial
            && self.accepting == other.accepting
    }
}

impl<Q: Eq + Hash, L: Eq + Hash + Ord> Eq for MultiColorAutomaton<Q, L> {}

impl<Q, L> Default for MultiColorAutomaton<Q, L> {
    fn default() -> Self {
        Self {
            transitions: IndexMap::new(),
            initial: IndexSet::new(),
            accepting: IndexMap::new(),
        }
    }
}

impl<Q, L> MultiColorAutomaton<Q, L>
where
    Q: Clone + Eq + Hash,
    L: Clone + Eq + Hash + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, q: Q) {
        self.transitions.entry(q).or_default();
    }

    pub fn add_transition(&mut self, source: Q, symbol: Symbol<L>, destination: Q) {
        self.add_state(destination.clone());
        self.transitions
            .entry(source)
            .or_default()
            .entry(symbol)
            .or_default()
            .insert(destination);
    }

    pub fn set_initial(&mut self, q: Q) {
        self.add_state(q.clone());
        self.initial.insert(q);
    }

    pub fn set_accepting(&mut self, q: Q, color: usize) {
        self.add_state(q.clone());
        self.accepting.entry(color).or_default().insert(q);
    }

    pub fn states(&self) -> impl Iterator<Item = &Q> {
        self.transitions.keys()
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn initial_states(&self) -> &IndexSet<Q> {
        &self.initial
    }

    /// The colors in use, in the order they were introduced.
    pub fn colors(&self) -> impl Iterator<Item = usize> + '_ {
        self.accepting.keys().copied()
    }

    pub fn color_count(&self) -> usize {
        self.accepting.len()
    }

    /// The accepting set for `color`; empty for unknown colors.
    pub fn accepting_states(&self, color: usize) -> IndexSet<Q> {
        self.accepting.get(&color).cloned().unwrap_or_default()
    }

    /// `delta(q, symbol)`; empty when no transition is defined.
    pub fn next_states(&self, q: &Q, symbol: &Symbol<L>) -> IndexSet<Q> {
        self.transitions
            .get(q)
            .and_then(|per_symbol| per_symbol.get(symbol))
            .cloned()
            .unwrap_or_default()
    }

    /// All `(source, symbol, destination)` triples, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&Q, &Symbol<L>, &Q)> {
        self.transitions.iter().flat_map(|(source, per_symbol)| {
            per_symbol.iter().flat_map(move |(sym, destinations)| {
                destinations.iter().map(move |d| (source, sym, d))
            })
        })
    }
}

impl<Q: fmt::Debug, L: fmt::Debug> fmt::Display for MultiColorAutomaton<Q, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, per_symbol) in &self.transitions {
            for (sym, destinations) in per_symbol {
                for d in destinations {
                    writeln!(f, "{source:?} --{sym:?}--> {d:?}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_register_their_endpoints() {
        let mut aut: BuchiAutomaton<&str, &str> = BuchiAutomaton::new();
        aut.add_transition("q0", symbol(["p"]), "q1");
        let states: Vec<_> = aut.states().collect();
        assert_eq!(states, vec![&"q1", &"q0"]);
    }

    #[test]
    fn missing_symbol_means_no_successors() {
        let mut aut: BuchiAutomaton<&str, &str> = BuchiAutomaton::new();
        aut.add_transition("q0", symbol(["p"]), "q1");
        assert!(aut.next_states(&"q0", &symbol([])).is_empty());
        assert_eq!(aut.next_states(&"q0", &symbol(["p"])).len(), 1);
    }

    #[test]
    fn colors_track_insertion_order() {
        let mut gnba: MultiColorAutomaton<u8, &str> = MultiColorAutomaton::new();
        gnba.set_accepting(1, 0);
        gnba.set_accepting(2, 1);
        gnba.set_accepting(3, 0);
        assert_eq!(gnba.colors().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(gnba.accepting_states(0).len(), 2);
        assert!(gnba.accepting_states(7).is_empty());
    }

    #[test]
    fn display_lists_every_edge() {
        let mut aut: BuchiAutomaton<&str, &str> = BuchiAutomaton::new();
        aut.add_transition("q0", symbol(["p"]), "q1");
        aut.add_transition("q0", symbol([]), "q0");
        let listing = aut.to_string();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.contains("\"q0\""));
    }
}
