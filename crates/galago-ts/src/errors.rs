use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Precondition violations raised by queries against a transition system.
///
/// These always indicate a malformed input from a transition-system
/// producer: the query is rejected at the call boundary and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ModelError {
    #[error("state {state} is not registered in the transition system")]
    #[diagnostic(code(galago::ts::unknown_state))]
    UnknownState { state: String },

    #[error("action {action} is not registered in the transition system")]
    #[diagnostic(code(galago::ts::unknown_action))]
    UnknownAction { action: String },
}

impl ModelError {
    pub fn unknown_state(state: &impl fmt::Debug) -> Self {
        ModelError::UnknownState {
            state: format!("{state:?}"),
        }
    }

    pub fn unknown_action(action: &impl fmt::Debug) -> Self {
        ModelError::UnknownAction {
            action: format!("{action:?}"),
        }
    }
}
