#![doc = include_str!("../README.md")]

//! Verification engine of the galago model checker.
//!
//! The pipeline checks a transition system against an LTL property by
//! translating the negated formula to a Büchi automaton, building the
//! system x automaton product, and searching it for an accepting lasso
//! with a nested depth-first search. Fairness-constrained queries reduce
//! to a bounded sequence of such checks over an action-tracking
//! extension of the system.

pub mod fairness;
pub mod lasso;
pub mod pipeline;
pub mod result;

pub use fairness::{verify_fair_ltl, FairAp, FairnessCondition};
pub use lasso::{find_accepting_lasso, is_language_empty, Lasso, LassoFinder};
pub use pipeline::{verify_ltl, verify_omega_regular_property};
pub use result::{Counterexample, VerificationResult};

pub use galago_ts::ModelError;
