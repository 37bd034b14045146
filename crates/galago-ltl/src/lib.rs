#![doc = include_str!("../README.md")]

//! LTL formulas and their translation to Büchi automata.

pub mod automaton;
pub mod closure;
pub mod formula;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest_generators;
pub mod translate;

pub use automaton::{symbol, BuchiAutomaton, MultiColorAutomaton, Symbol};
pub use formula::Ltl;
pub use translate::{degeneralize, ltl_to_gnba, ltl_to_nba, ElementarySet};
