use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

/// One element of the transition relation: a `(from, action, to)` triple.
///
/// Transitions live in a set, so adding the same triple twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition<S, A> {
    pub from: S,
    pub action: A,
    pub to: S,
}

impl<S, A> Transition<S, A> {
    pub fn new(from: S, action: A, to: S) -> Self {
        Self { from, action, to }
    }
}

/// An explicit-state transition system `(S, Act, AP, ->, I, L)`.
///
/// Built once through [`TransitionSystemBuilder`] and read-only afterwards.
/// Every state referenced by the transition relation, the initial set, or
/// the labeling is registered in the state set; the builder maintains this
/// by registering states and actions as a side effect of mentioning them.
///
/// The triple set is the authoritative representation of the relation;
/// the per-state edge indexes are derived from it at build time and only
/// serve the successor/predecessor queries.
#[derive(Debug, Clone)]
pub struct TransitionSystem<S, A, P> {
    pub(crate) name: String,
    pub(crate) states: IndexSet<S>,
    pub(crate) actions: IndexSet<A>,
    pub(crate) propositions: IndexSet<P>,
    pub(crate) transitions: IndexSet<Transition<S, A>>,
    pub(crate) initial: IndexSet<S>,
    pub(crate) labels: IndexMap<S, BTreeSet<P>>,
    pub(crate) outgoing: IndexMap<S, IndexSet<(A, S)>>,
    pub(crate) incoming: IndexMap<S, IndexSet<(A, S)>>,
}

impl<S: Eq + Hash, A: Eq + Hash, P: Eq + Hash + Ord> PartialEq for TransitionSystem<S, A, P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.states == other.states
            && self.actions == other.actions
            && self.propositions == other.propositions
            && self.transitions == other.transitions
            && self.initial == other.initial
            && self.labels == other.labels
            && self.outgoing == other.outgoing
            && self.incoming == other.incoming
    }
}

impl<S: Eq + Hash, A: Eq + Hash, P: Eq + Hash + Ord> Eq for TransitionSystem<S, A, P> {}

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    pub fn builder() -> TransitionSystemBuilder<S, A, P> {
        TransitionSystemBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &IndexSet<S> {
        &self.states
    }

    pub fn actions(&self) -> &IndexSet<A> {
        &self.actions
    }

    pub fn propositions(&self) -> &IndexSet<P> {
        &self.propositions
    }

    pub fn transitions(&self) -> &IndexSet<Transition<S, A>> {
        &self.transitions
    }

    pub fn initial_states(&self) -> &IndexSet<S> {
        &self.initial
    }

    /// The atomic propositions holding in `s`; empty for unlabeled states.
    pub fn label(&self, s: &S) -> BTreeSet<P> {
        self.labels.get(s).cloned().unwrap_or_default()
    }

    pub fn has_state(&self, s: &S) -> bool {
        self.states.contains(s)
    }

    pub fn has_action(&self, a: &A) -> bool {
        self.actions.contains(a)
    }
}

/// Exclusive owner of the collections while a system is under construction.
///
/// All `add_*` methods register the states and actions they mention, so the
/// finished system cannot reference anything outside its own state set.
#[derive(Debug, Clone)]
pub struct TransitionSystemBuilder<S, A, P> {
    name: String,
    states: IndexSet<S>,
    actions: IndexSet<A>,
    propositions: IndexSet<P>,
    transitions: IndexSet<Transition<S, A>>,
    initial: IndexSet<S>,
    labels: IndexMap<S, BTreeSet<P>>,
}

impl<S, A, P> Default for TransitionSystemBuilder<S, A, P> {
    fn default() -> Self {
        Self {
            name: String::new(),
            states: IndexSet::new(),
            actions: IndexSet::new(),
            propositions: IndexSet::new(),
            transitions: IndexSet::new(),
            initial: IndexSet::new(),
            labels: IndexMap::new(),
        }
    }
}

impl<S, A, P> TransitionSystemBuilder<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn add_state(&mut self, s: S) -> &mut Self {
        self.states.insert(s);
        self
    }

    pub fn add_states(&mut self, states: impl IntoIterator<Item = S>) -> &mut Self {
        for s in states {
            self.add_state(s);
        }
        self
    }

    pub fn add_action(&mut self, a: A) -> &mut Self {
        self.actions.insert(a);
        self
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = A>) -> &mut Self {
        for a in actions {
            self.add_action(a);
        }
        self
    }

    pub fn add_atomic_proposition(&mut self, p: P) -> &mut Self {
        self.propositions.insert(p);
        self
    }

    pub fn add_atomic_propositions(&mut self, props: impl IntoIterator<Item = P>) -> &mut Self {
        for p in props {
            self.add_atomic_proposition(p);
        }
        self
    }

    pub fn add_initial_state(&mut self, s: S) -> &mut Self {
        self.states.insert(s.clone());
        self.initial.insert(s);
        self
    }

    pub fn add_transition(&mut self, from: S, action: A, to: S) -> &mut Self {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.actions.insert(action.clone());
        self.transitions.insert(Transition::new(from, action, to));
        self
    }

    /// Adds `p` to the label of `s`, registering both.
    pub fn add_label(&mut self, s: S, p: P) -> &mut Self {
        self.states.insert(s.clone());
        self.propositions.insert(p.clone());
        self.labels.entry(s).or_default().insert(p);
        self
    }

    pub fn build(self) -> TransitionSystem<S, A, P> {
        let mut outgoing: IndexMap<S, IndexSet<(A, S)>> = IndexMap::new();
        let mut incoming: IndexMap<S, IndexSet<(A, S)>> = IndexMap::new();
        for t in &self.transitions {
            outgoing
                .entry(t.from.clone())
                .or_default()
                .insert((t.action.clone(), t.to.clone()));
            incoming
                .entry(t.to.clone())
                .or_default()
                .insert((t.action.clone(), t.from.clone()));
        }
        TransitionSystem {
            name: self.name,
            states: self.states,
            actions: self.actions,
            propositions: self.propositions,
            transitions: self.transitions,
            initial: self.initial,
            labels: self.labels,
            outgoing,
            incoming,
        }
    }
}
