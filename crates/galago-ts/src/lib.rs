#![doc = include_str!("../README.md")]

//! Transition-system core of the galago model checker.
//!
//! This crate defines the explicit-state transition system and its
//! builder, the graph primitives (post/pre, reachability, determinism
//! checks), execution fragments, and the product constructions.

pub mod analysis;
pub mod errors;
pub mod execution;
pub mod product;
pub mod transition_system;

pub use errors::ModelError;
pub use execution::ExecutionFragment;
pub use product::{interleave, interleave_with_handshake, product};
pub use transition_system::{Transition, TransitionSystem, TransitionSystemBuilder};
