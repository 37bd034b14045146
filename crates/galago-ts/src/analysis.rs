//! Successor/predecessor queries, reachability, and determinism checks.

use crate::errors::ModelError;
use crate::transition_system::TransitionSystem;
use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    /// `Post(s)`: all states reachable from `s` in one step.
    pub fn post(&self, s: &S) -> Result<IndexSet<S>, ModelError> {
        self.require_state(s)?;
        Ok(self.post_unchecked(s))
    }

    /// `Post(s, a)`: one-step successors of `s` under action `a`.
    pub fn post_via(&self, s: &S, a: &A) -> Result<IndexSet<S>, ModelError> {
        self.require_state(s)?;
        self.require_action(a)?;
        Ok(self
            .outgoing
            .get(s)
            .into_iter()
            .flatten()
            .filter(|(action, _)| action == a)
            .map(|(_, to)| to.clone())
            .collect())
    }

    /// Union of `Post(s)` over all `s` in `set`. Empty input yields an
    /// empty result without touching the state registry.
    pub fn post_set<'a>(
        &self,
        set: impl IntoIterator<Item = &'a S>,
    ) -> Result<IndexSet<S>, ModelError>
    where
        S: 'a,
    {
        let mut out = IndexSet::new();
        for s in set {
            out.extend(self.post(s)?);
        }
        Ok(out)
    }

    /// Union of `Post(s, a)` over all `s` in `set`.
    pub fn post_set_via<'a>(
        &self,
        set: impl IntoIterator<Item = &'a S>,
        a: &A,
    ) -> Result<IndexSet<S>, ModelError>
    where
        S: 'a,
    {
        let mut out = IndexSet::new();
        for s in set {
            out.extend(self.post_via(s, a)?);
        }
        Ok(out)
    }

    /// `Pre(s)`: all states with a one-step transition into `s`.
    pub fn pre(&self, s: &S) -> Result<IndexSet<S>, ModelError> {
        self.require_state(s)?;
        Ok(self
            .incoming
            .get(s)
            .into_iter()
            .flatten()
            .map(|(_, from)| from.clone())
            .collect())
    }

    /// `Pre(s, a)`: one-step predecessors of `s` under action `a`.
    pub fn pre_via(&self, s: &S, a: &A) -> Result<IndexSet<S>, ModelError> {
        self.require_state(s)?;
        self.require_action(a)?;
        Ok(self
            .incoming
            .get(s)
            .into_iter()
            .flatten()
            .filter(|(action, _)| action == a)
            .map(|(_, from)| from.clone())
            .collect())
    }

    /// Union of `Pre(s)` over all `s` in `set`.
    pub fn pre_set<'a>(
        &self,
        set: impl IntoIterator<Item = &'a S>,
    ) -> Result<IndexSet<S>, ModelError>
    where
        S: 'a,
    {
        let mut out = IndexSet::new();
        for s in set {
            out.extend(self.pre(s)?);
        }
        Ok(out)
    }

    /// Union of `Pre(s, a)` over all `s` in `set`.
    pub fn pre_set_via<'a>(
        &self,
        set: impl IntoIterator<Item = &'a S>,
        a: &A,
    ) -> Result<IndexSet<S>, ModelError>
    where
        S: 'a,
    {
        let mut out = IndexSet::new();
        for s in set {
            out.extend(self.pre_via(s, a)?);
        }
        Ok(out)
    }

    /// `Reach(TS)`: the least set containing the initial states and closed
    /// under `Post`. Each state enters the worklist at most once.
    pub fn reach(&self) -> IndexSet<S> {
        let mut visited: IndexSet<S> = IndexSet::new();
        let mut worklist: VecDeque<S> = VecDeque::new();
        for s in &self.initial {
            if visited.insert(s.clone()) {
                worklist.push_back(s.clone());
            }
        }
        while let Some(s) = worklist.pop_front() {
            for succ in self.post_unchecked(&s) {
                if visited.insert(succ.clone()) {
                    worklist.push_back(succ);
                }
            }
        }
        visited
    }

    /// A state is terminal when it has no outgoing transitions.
    pub fn is_state_terminal(&self, s: &S) -> Result<bool, ModelError> {
        Ok(self.post(s)?.is_empty())
    }

    /// Action determinism: at most one initial state, and for every state
    /// and action at most one successor. Unreachable states count too.
    pub fn is_action_deterministic(&self) -> bool {
        if self.initial.len() > 1 {
            return false;
        }
        for s in &self.states {
            // Two out-edges of one state sharing an action means two
            // successors for that action.
            let mut seen: IndexSet<&A> = IndexSet::new();
            for (action, _) in self.outgoing.get(s).into_iter().flatten() {
                if !seen.insert(action) {
                    return false;
                }
            }
        }
        true
    }

    /// Label determinism: at most one initial state, and no state has two
    /// successors carrying the same atomic-proposition set.
    pub fn is_ap_deterministic(&self) -> bool {
        if self.initial.len() > 1 {
            return false;
        }
        for s in &self.states {
            let successors = self.post_unchecked(s);
            let distinct_labels: IndexSet<BTreeSet<P>> =
                successors.iter().map(|succ| self.label(succ)).collect();
            if distinct_labels.len() != successors.len() {
                return false;
            }
        }
        true
    }

    /// Returns a copy of the system restricted to its reachable fragment.
    ///
    /// The alphabet (actions and atomic propositions) is kept as-is; only
    /// states, transitions, initial states, and labels are filtered. This
    /// is the one sanctioned removal pass after additive construction.
    pub fn restrict_to_reachable(&self) -> Self {
        let reachable = self.reach();
        let mut builder = Self::builder();
        builder.name(self.name.clone());
        builder.add_actions(self.actions.iter().cloned());
        builder.add_atomic_propositions(self.propositions.iter().cloned());
        for s in &reachable {
            builder.add_state(s.clone());
            for p in self.label(s) {
                builder.add_label(s.clone(), p);
            }
        }
        for s in &self.initial {
            builder.add_initial_state(s.clone());
        }
        for t in &self.transitions {
            if reachable.contains(&t.from) && reachable.contains(&t.to) {
                builder.add_transition(t.from.clone(), t.action.clone(), t.to.clone());
            }
        }
        builder.build()
    }

    pub(crate) fn post_unchecked(&self, s: &S) -> IndexSet<S> {
        self.outgoing
            .get(s)
            .into_iter()
            .flatten()
            .map(|(_, to)| to.clone())
            .collect()
    }

    fn require_state(&self, s: &S) -> Result<(), ModelError> {
        if self.states.contains(s) {
            Ok(())
        } else {
            Err(ModelError::unknown_state(s))
        }
    }

    fn require_action(&self, a: &A) -> Result<(), ModelError> {
        if self.actions.contains(a) {
            Ok(())
        } else {
            Err(ModelError::unknown_action(a))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ts = TransitionSystem<u32, char, &'static str>;

    /// 0 --a--> 1 --a--> 2, 1 --b--> 1, state 3 unreachable.
    fn diamond() -> Ts {
        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 'a', 1)
            .add_transition(1, 'a', 2)
            .add_transition(1, 'b', 1)
            .add_state(3)
            .add_transition(3, 'a', 2);
        b.build()
    }

    #[test]
    fn post_and_pre_agree_with_the_relation() {
        let ts = diamond();
        assert_eq!(ts.post(&0).unwrap(), IndexSet::from([1]));
        assert_eq!(ts.post(&1).unwrap(), IndexSet::from([2, 1]));
        assert_eq!(ts.post_via(&1, &'b').unwrap(), IndexSet::from([1]));
        assert_eq!(ts.pre(&2).unwrap(), IndexSet::from([1, 3]));
        assert_eq!(ts.pre_via(&1, &'a').unwrap(), IndexSet::from([0]));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let ts = diamond();
        assert!(matches!(
            ts.post(&99),
            Err(ModelError::UnknownState { .. })
        ));
        assert!(matches!(ts.pre(&99), Err(ModelError::UnknownState { .. })));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let ts = diamond();
        assert!(matches!(
            ts.post_via(&0, &'z'),
            Err(ModelError::UnknownAction { .. })
        ));
    }

    #[test]
    fn set_queries_union_and_tolerate_empty_input() {
        let ts = diamond();
        assert_eq!(ts.post_set([&0, &1]).unwrap(), IndexSet::from([1, 2]));
        assert!(ts.post_set([]).unwrap().is_empty());
        assert!(ts.pre_set([]).unwrap().is_empty());
    }

    #[test]
    fn reach_excludes_disconnected_states() {
        let ts = diamond();
        assert_eq!(ts.reach(), IndexSet::from([0, 1, 2]));
    }

    #[test]
    fn terminality() {
        let ts = diamond();
        assert!(ts.is_state_terminal(&2).unwrap());
        assert!(!ts.is_state_terminal(&1).unwrap());
    }

    #[test]
    fn action_determinism_counts_unreachable_states() {
        let ts = diamond();
        assert!(ts.is_action_deterministic());

        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_state(7)
            .add_transition(7, 'a', 0)
            .add_transition(7, 'a', 1);
        assert!(!b.build().is_action_deterministic());
    }

    #[test]
    fn two_initial_states_break_both_determinisms() {
        let mut b = Ts::builder();
        b.add_initial_state(0).add_initial_state(1);
        let ts = b.build();
        assert!(!ts.is_action_deterministic());
        assert!(!ts.is_ap_deterministic());
    }

    #[test]
    fn ap_determinism_sees_duplicate_successor_labels() {
        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 'a', 1)
            .add_transition(0, 'b', 2)
            .add_label(1, "p")
            .add_label(2, "p");
        assert!(!b.build().is_ap_deterministic());

        let mut b = Ts::builder();
        b.add_initial_state(0)
            .add_transition(0, 'a', 1)
            .add_transition(0, 'b', 2)
            .add_label(1, "p");
        assert!(b.build().is_ap_deterministic());
    }

    #[test]
    fn restriction_drops_the_unreachable_fragment() {
        let ts = diamond();
        let restricted = ts.restrict_to_reachable();
        assert!(!restricted.has_state(&3));
        assert_eq!(restricted.reach(), ts.reach());
        // Alphabet survives the restriction untouched.
        assert_eq!(restricted.actions(), ts.actions());
    }
}
