//! Nested depth-first search for Büchi non-emptiness.
//!
//! The outer DFS explores the reachable fragment; whenever it finishes an
//! accepting state, an inner DFS looks for a path back to that state. A
//! hit means some accepting state lies on a reachable cycle, so the
//! automaton (or product) admits an accepting infinite run.

use galago_ltl::automaton::{BuchiAutomaton, Symbol};
use galago_ts::{ModelError, TransitionSystem};
use indexmap::IndexSet;
use std::fmt;
use std::hash::Hash;
use tracing::debug;

/// A witness for non-emptiness: a path from an initial state (`prefix`)
/// into a cycle through an accepting state (`cycle`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lasso<S> {
    pub prefix: Vec<S>,
    pub cycle: Vec<S>,
}

/// One nested search over a transition system.
///
/// The finder owns both visited sets and both stacks for the duration of
/// the search; nothing mid-search is observable from outside. The inner
/// visited set persists across inner invocations, which keeps the whole
/// search linear in the transition relation.
pub struct LassoFinder<'a, S, A, P, F> {
    ts: &'a TransitionSystem<S, A, P>,
    is_accepting: F,
    outer_visited: IndexSet<S>,
    outer_stack: Vec<S>,
    inner_visited: IndexSet<S>,
}

impl<'a, S, A, P, F> LassoFinder<'a, S, A, P, F>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
    F: Fn(&S) -> bool,
{
    pub fn new(ts: &'a TransitionSystem<S, A, P>, is_accepting: F) -> Self {
        Self {
            ts,
            is_accepting,
            outer_visited: IndexSet::new(),
            outer_stack: Vec::new(),
            inner_visited: IndexSet::new(),
        }
    }

    /// Runs the search to completion. `None` means the language is
    /// empty: no reachable cycle passes through an accepting state.
    pub fn search(mut self) -> Result<Option<Lasso<S>>, ModelError> {
        let roots: Vec<S> = self.ts.initial_states().iter().cloned().collect();
        for root in roots {
            if self.outer_visited.contains(&root) {
                continue;
            }
            if let Some(lasso) = self.search_from(root)? {
                debug!(
                    prefix = lasso.prefix.len(),
                    cycle = lasso.cycle.len(),
                    "accepting lasso found"
                );
                return Ok(Some(lasso));
            }
        }
        debug!(visited = self.outer_visited.len(), "no accepting lasso");
        Ok(None)
    }

    /// Outer DFS from one initial state. On backtracking from an
    /// accepting state, launches the inner cycle search there.
    fn search_from(&mut self, root: S) -> Result<Option<Lasso<S>>, ModelError> {
        self.outer_visited.insert(root.clone());
        self.outer_stack.push(root);
        loop {
            let Some(top) = self.outer_stack.last().cloned() else {
                return Ok(None);
            };
            let unvisited = self
                .ts
                .post(&top)?
                .into_iter()
                .find(|s| !self.outer_visited.contains(s));
            match unvisited {
                Some(successor) => {
                    self.outer_visited.insert(successor.clone());
                    self.outer_stack.push(successor);
                }
                None => {
                    self.outer_stack.pop();
                    if (self.is_accepting)(&top) {
                        if let Some(cycle) = self.cycle_from(&top)? {
                            // The outer stack, bottom to top, is the path
                            // from the initial state to the cycle entry.
                            return Ok(Some(Lasso {
                                prefix: self.outer_stack.clone(),
                                cycle,
                            }));
                        }
                    }
                }
            }
        }
    }

    /// Inner DFS: looks for a path from `root` back to `root`. Returns
    /// the cycle as the inner stack, bottom to top, on success.
    fn cycle_from(&mut self, root: &S) -> Result<Option<Vec<S>>, ModelError> {
        let mut stack: Vec<S> = vec![root.clone()];
        self.inner_visited.insert(root.clone());
        loop {
            let Some(top) = stack.last().cloned() else {
                return Ok(None);
            };
            let successors = self.ts.post(&top)?;
            if successors.contains(root) {
                return Ok(Some(stack));
            }
            match successors
                .into_iter()
                .find(|s| !self.inner_visited.contains(s))
            {
                Some(successor) => {
                    self.inner_visited.insert(successor.clone());
                    stack.push(successor);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}

/// Decides non-emptiness of an automaton's language by running the
/// nested search over its transition graph.
pub fn find_accepting_lasso<Q, L>(
    aut: &BuchiAutomaton<Q, L>,
) -> Result<Option<Lasso<Q>>, ModelError>
where
    Q: Clone + Eq + Hash + fmt::Debug,
    L: Clone + Eq + Hash + Ord + fmt::Debug,
{
    let mut builder = TransitionSystem::<Q, Symbol<L>, L>::builder();
    for q in aut.states() {
        builder.add_state(q.clone());
    }
    for q0 in aut.initial_states() {
        builder.add_initial_state(q0.clone());
    }
    for (source, sym, destination) in aut.edges() {
        builder.add_transition(source.clone(), sym.clone(), destination.clone());
    }
    let graph = builder.build();
    let accepting = aut.accepting_states();
    LassoFinder::new(&graph, |q: &Q| accepting.contains(q)).search()
}

/// `true` iff the automaton accepts no infinite word.
pub fn is_language_empty<Q, L>(aut: &BuchiAutomaton<Q, L>) -> Result<bool, ModelError>
where
    Q: Clone + Eq + Hash + fmt::Debug,
    L: Clone + Eq + Hash + Ord + fmt::Debug,
{
    Ok(find_accepting_lasso(aut)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ts = TransitionSystem<u32, char, &'static str>;

    fn finder(ts: &Ts, accepting: &'static [u32]) -> Option<Lasso<u32>> {
        LassoFinder::new(ts, |s: &u32| accepting.contains(s))
            .search()
            .unwrap()
    }

    #[test]
    fn accepting_self_loop_is_a_lasso() {
        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 't', 1)
            .add_transition(1, 't', 1);
        let ts = b.build();
        let lasso = finder(&ts, &[1]).expect("lasso expected");
        assert_eq!(lasso.prefix, vec![0]);
        assert_eq!(lasso.cycle, vec![1]);
    }

    #[test]
    fn accepting_state_off_cycle_is_not_enough() {
        // 0 -> 1 -> 2 -> 1 with only the dead-end 3 accepting.
        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 't', 1)
            .add_transition(1, 't', 2)
            .add_transition(2, 't', 1)
            .add_transition(0, 't', 3);
        let ts = b.build();
        assert!(finder(&ts, &[3]).is_none());
        assert!(finder(&ts, &[2]).is_some());
    }

    #[test]
    fn cycle_may_pass_through_intermediate_states() {
        // Accepting 1 on the cycle 1 -> 2 -> 3 -> 1.
        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 't', 1)
            .add_transition(1, 't', 2)
            .add_transition(2, 't', 3)
            .add_transition(3, 't', 1);
        let ts = b.build();
        let lasso = finder(&ts, &[1]).expect("lasso expected");
        assert_eq!(lasso.cycle, vec![1, 2, 3]);
        assert_eq!(lasso.prefix, vec![0]);
    }

    #[test]
    fn initial_accepting_loop_has_empty_prefix() {
        let mut b = Ts::builder();
        b.add_initial_state(0).add_transition(0, 't', 0);
        let ts = b.build();
        let lasso = finder(&ts, &[0]).expect("lasso expected");
        assert!(lasso.prefix.is_empty());
        assert_eq!(lasso.cycle, vec![0]);
    }

    #[test]
    fn empty_automaton_language_is_detected() {
        let mut aut: BuchiAutomaton<&str, &str> = BuchiAutomaton::new();
        aut.set_initial("q0");
        aut.add_transition("q0", galago_ltl::symbol(["p"]), "q1");
        aut.set_accepting("q1"); // q1 has no outgoing edge: no cycle
        assert!(is_language_empty(&aut).unwrap());

        aut.add_transition("q1", galago_ltl::symbol(["p"]), "q1");
        assert!(!is_language_empty(&aut).unwrap());
    }
}
