//! Alternating state/action sequences and the execution-fragment checks.

use crate::errors::ModelError;
use crate::transition_system::{Transition, TransitionSystem};
use std::fmt;
use std::hash::Hash;

/// A finite alternating sequence `s0 a1 s1 a2 s2 ...` of states and the
/// actions taken between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionFragment<S, A> {
    head: S,
    steps: Vec<(A, S)>,
}

impl<S, A> ExecutionFragment<S, A> {
    pub fn new(head: S) -> Self {
        Self {
            head,
            steps: Vec::new(),
        }
    }

    /// Appends one `action, state` step; chainable.
    pub fn then(mut self, action: A, state: S) -> Self {
        self.steps.push((action, state));
        self
    }

    pub fn head(&self) -> &S {
        &self.head
    }

    pub fn last(&self) -> &S {
        self.steps.last().map(|(_, s)| s).unwrap_or(&self.head)
    }

    /// Number of states in the sequence.
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false // a fragment always carries at least its head state
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        std::iter::once(&self.head).chain(self.steps.iter().map(|(_, s)| s))
    }
}

impl<S, A, P> TransitionSystem<S, A, P>
where
    S: Clone + Eq + Hash + fmt::Debug,
    A: Clone + Eq + Hash + fmt::Debug,
    P: Clone + Eq + Hash + Ord + fmt::Debug,
{
    /// Whether `e` walks only along registered transitions.
    ///
    /// States and actions mentioned by `e` must be registered; an
    /// unregistered one is an error, not a `false`.
    pub fn is_execution_fragment(
        &self,
        e: &ExecutionFragment<S, A>,
    ) -> Result<bool, ModelError> {
        if !self.has_state(&e.head) {
            return Err(ModelError::unknown_state(&e.head));
        }
        let mut current = &e.head;
        for (action, next) in &e.steps {
            if !self.has_action(action) {
                return Err(ModelError::unknown_action(action));
            }
            if !self.has_state(next) {
                return Err(ModelError::unknown_state(next));
            }
            let step = Transition::new(current.clone(), action.clone(), next.clone());
            if !self.transitions().contains(&step) {
                return Ok(false);
            }
            current = next;
        }
        Ok(true)
    }

    /// An execution fragment that starts in an initial state.
    pub fn is_initial_execution_fragment(
        &self,
        e: &ExecutionFragment<S, A>,
    ) -> Result<bool, ModelError> {
        Ok(self.initial_states().contains(e.head()) && self.is_execution_fragment(e)?)
    }

    /// An execution fragment that cannot be extended.
    pub fn is_maximal_execution_fragment(
        &self,
        e: &ExecutionFragment<S, A>,
    ) -> Result<bool, ModelError> {
        Ok(self.is_state_terminal(e.last())? && self.is_execution_fragment(e)?)
    }

    /// A maximal initial execution fragment.
    pub fn is_execution(&self, e: &ExecutionFragment<S, A>) -> Result<bool, ModelError> {
        Ok(self.is_initial_execution_fragment(e)? && self.is_maximal_execution_fragment(e)?)
    }
}
